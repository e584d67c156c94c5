use wireloft_core::show_url::{validate, ERR_DOMAIN, ERR_PATH, ERR_SLUG};

#[test]
fn canonical_show_url_is_fully_valid() {
    let r = validate("https://www.dailywire.com/show/the-ben-shapiro-show");
    assert!(r.domain_ok && r.path_ok && r.slug_ok);
    assert!(r.errors.is_empty());
    assert_eq!(
        r.normalized.as_deref(),
        Some("https://www.dailywire.com/show/the-ben-shapiro-show")
    );
}

#[test]
fn bare_host_input_gets_https() {
    let r = validate("dailywire.com/show/x");
    assert!(r.is_valid());
    assert_eq!(r.normalized.as_deref(), Some("https://dailywire.com/show/x"));
}

#[test]
fn inputs_without_scheme_match_https_prefixed_inputs() {
    let samples = [
        "dailywire.com/show/x",
        "www.dailywire.com/show/the-matt-walsh-show/",
        "example.com/show/x",
        "DailyWire.com/shows",
        "dailywire.com/show/",
        "dailywire.com",
        "www.dailywire.com/show/a?utm=1#top",
    ];
    for s in samples {
        assert_eq!(validate(s), validate(&format!("https://{s}")), "input {s}");
    }
}

#[test]
fn validation_is_idempotent_on_normalized_output() {
    let samples = [
        "dailywire.com/show/x",
        "HTTPS://WWW.DAILYWIRE.COM/show/abc",
        "example.com/whatever",
        "www.dailywire.com/show/",
        "http://dailywire.com:8080/show/x/y",
    ];
    for s in samples {
        let first = validate(s);
        let normalized = first.normalized.clone().expect("parseable");
        assert_eq!(validate(&normalized).normalized, first.normalized, "input {s}");
    }
}

#[test]
fn foreign_domain_fails_only_the_domain_rule() {
    let r = validate("https://example.com/show/the-ben-shapiro-show");
    assert!(!r.domain_ok);
    assert!(r.path_ok && r.slug_ok);
    assert_eq!(r.errors, vec![ERR_DOMAIN]);
    assert!(r.normalized.is_some());
}

#[test]
fn foreign_domain_and_bad_path_report_in_fixed_order() {
    let r = validate("https://example.com/podcasts/x");
    assert_eq!(r.errors, vec![ERR_DOMAIN, ERR_PATH, ERR_SLUG]);
}

#[test]
fn empty_slug_keeps_path_but_fails_slug() {
    let r = validate("https://www.dailywire.com/show/");
    assert!(r.domain_ok);
    assert!(r.path_ok);
    assert!(!r.slug_ok);
    assert_eq!(r.errors, vec![ERR_SLUG]);
}

#[test]
fn trailing_slash_after_slug_is_accepted() {
    assert!(validate("https://dailywire.com/show/ben-after-dark/").is_valid());
}

#[test]
fn host_match_ignores_case_but_path_does_not() {
    assert!(validate("https://WWW.DailyWire.COM/show/x").is_valid());

    let r = validate("https://www.dailywire.com/Show/x");
    assert!(r.domain_ok);
    assert!(!r.path_ok);
    assert!(!r.slug_ok);
}

#[test]
fn subdomains_other_than_www_are_rejected() {
    assert!(!validate("https://api.dailywire.com/show/x").domain_ok);
    assert!(!validate("https://dailywire.com.evil.test/show/x").domain_ok);
}

#[test]
fn other_schemes_are_parsed_but_fail_rules() {
    let r = validate("mailto:someone@dailywire.com");
    assert!(!r.is_valid());
    assert!(r.normalized.is_some());
}
