use std::fmt;

use wireloft_core::ShowId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Shows,
    MediaProfiles,
    Show(ShowId),
}

impl QueryKey {
    /// Local-store key of the mirrored copy. Only the top-level collections are mirrored.
    pub fn mirror_key(&self) -> Option<String> {
        match self {
            QueryKey::Shows => Some(wireloft_config::storage_key("shows")),
            QueryKey::MediaProfiles => Some(wireloft_config::storage_key("mediaProfiles")),
            QueryKey::Show(_) => None,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Shows => f.write_str("shows"),
            QueryKey::MediaProfiles => f.write_str("mediaProfiles"),
            QueryKey::Show(id) => write!(f, "show:{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_query_key_convention() {
        assert_eq!(QueryKey::Shows.to_string(), "shows");
        assert_eq!(QueryKey::MediaProfiles.to_string(), "mediaProfiles");
        assert_eq!(QueryKey::Show("ben".into()).to_string(), "show:ben");
    }

    #[test]
    fn only_collections_are_mirrored() {
        assert_eq!(
            QueryKey::Shows.mirror_key().as_deref(),
            Some("wl_rq_v1:shows")
        );
        assert_eq!(
            QueryKey::MediaProfiles.mirror_key().as_deref(),
            Some("wl_rq_v1:mediaProfiles")
        );
        assert_eq!(QueryKey::Show("ben".into()).mirror_key(), None);
    }
}
