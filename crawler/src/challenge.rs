/// Shell-page markers emitted by CDN/WAF challenge interstitials. Only
/// explicit challenge shells count; a normal page that merely references a
/// WAF script resource must not be flagged.
const CHALLENGE_MARKERS: &[&str] = &[
    // Cloudflare interstitial titles and challenge form scaffolding
    "<title>just a moment...</title>",
    "<title>attention required! | cloudflare</title>",
    "cf-browser-verification",
    "challenge-form",
    "cf-chl-widget",
    // Imperva/Incapsula iframe shells
    "_incapsula_resource",
    "request unsuccessful. incapsula incident id",
    // PerimeterX / DataDome captcha shells
    "px-captcha",
    "captcha-delivery.com",
    // Generic verification interstitials
    "verifying your connection",
    "checking your browser before accessing",
    "verify you are human",
    "please enable javascript and cookies to continue",
    "pardon our interruption",
];

/// True when the body is a bot-challenge shell rather than page content.
pub fn looks_like_bot_challenge(body: &str) -> bool {
    let lowered = body.to_lowercase();
    CHALLENGE_MARKERS.iter().any(|marker| lowered.contains(marker))
}

#[cfg(test)]
#[path = "challenge_test.rs"]
mod tests;
