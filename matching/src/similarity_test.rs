use super::*;

#[test]
fn identical_names_score_one() {
    assert_eq!(token_set_ratio("ACER NITRO 16", "ACER NITRO 16"), 1.0);
}

#[test]
fn glued_model_tokens_count_as_containment() {
    // Retailers disagree about "Nitro 16" vs "Nitro16"; every token on the
    // shorter side is covered, so the names describe the same product.
    let score = token_set_ratio("ACER NITRO 16 GAMING", "ACER NITRO16 GAMING LAPTOP");
    assert_eq!(score, 1.0);
}

#[test]
fn unrelated_names_score_low() {
    let score = token_set_ratio("ACER NITRO 16 GAMING", "PANADOL TABLETS 500MG");
    assert!(score < 0.5, "got {score}");
}

#[test]
fn ratio_is_symmetric() {
    let pairs = [
        ("ACER NITRO 16 GAMING", "ACER NITRO16 GAMING LAPTOP"),
        ("FENTY GLOSS BOMB", "GLOSS BOMB UNIVERSAL"),
        ("LG OLED TV", "SAMSUNG QLED TV"),
    ];
    for (a, b) in pairs {
        assert_eq!(token_set_ratio(a, b), token_set_ratio(b, a), "{a} vs {b}");
        assert_eq!(token_jaccard(a, b), token_jaccard(b, a), "{a} vs {b}");
    }
}

#[test]
fn empty_inputs() {
    assert_eq!(token_set_ratio("", ""), 1.0);
    assert_eq!(token_set_ratio("ACER", ""), 0.0);
    assert_eq!(token_jaccard("", "ACER"), 0.0);
}

#[test]
fn jaccard_counts_exact_tokens_only() {
    let score = token_jaccard("ACER NITRO 16 GAMING", "ACER NITRO16 GAMING LAPTOP");
    // shared: ACER, GAMING; union has 6 tokens
    assert!((score - 2.0 / 6.0).abs() < 1e-9);
}
