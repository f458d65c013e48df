use super::*;

#[test]
fn detects_cloudflare_interstitial() {
    let blocked =
        "<html><head><title>Just a moment...</title></head><body>challenge-form</body></html>";
    assert!(looks_like_bot_challenge(blocked));
}

#[test]
fn detects_incapsula_iframe_shell() {
    let blocked = r#"<html><body><iframe src="/_Incapsula_Resource?SWJIYLWA=719"></iframe></body></html>"#;
    assert!(looks_like_bot_challenge(blocked));
}

#[test]
fn detects_verification_interstitials() {
    assert!(looks_like_bot_challenge(
        "<html><body>Verifying your connection ...</body></html>"
    ));
    assert!(looks_like_bot_challenge(
        "<html><body>Please enable JavaScript and cookies to continue</body></html>"
    ));
}

#[test]
fn normal_product_page_is_not_flagged() {
    let normal = "<html><head><title>Product</title></head><body>$399.00</body></html>";
    assert!(!looks_like_bot_challenge(normal));
}

#[test]
fn waf_script_reference_alone_is_not_flagged() {
    // Pages that merely load a WAF resource are real content, not shells.
    let normal = r#"<html><head><title>Acer Nitro 16</title>
        <script src="https://static.cloudflareinsights.com/beacon.min.js"></script>
        </head><body><h1>Acer Nitro 16</h1><span>$1,999.00</span></body></html>"#;
    assert!(!looks_like_bot_challenge(normal));
}
