use scraper::Html;
use serde_json::json;

use super::*;

const BASE: &str = "https://example.com";

#[test]
fn json_ld_image_wins() {
    let doc = Html::parse_document("<html></html>");
    let product = json!({ "image": ["https://cdn.example.com/p/main.jpg"] });
    assert_eq!(
        extract_image_url(&product, &doc, "Product", BASE),
        Some("https://cdn.example.com/p/main.jpg".to_string())
    );
}

#[test]
fn twitter_meta_is_used_when_og_image_missing() {
    let doc = Html::parse_document(
        r#"<html><head><meta name="twitter:image" content="https://cdn.example.com/p/main.jpg"/></head></html>"#,
    );
    assert_eq!(
        extract_image_url(&json!({}), &doc, "Example Product", BASE),
        Some("https://cdn.example.com/p/main.jpg".to_string())
    );
}

#[test]
fn meta_candidates_with_logo_tokens_are_skipped() {
    let doc = Html::parse_document(
        r#"<html><head>
          <meta property="og:image" content="https://static.example.com/site_logo.png"/>
          <meta name="twitter:image" content="https://cdn.example.com/p/hero.jpg"/>
        </head></html>"#,
    );
    assert_eq!(
        extract_image_url(&json!({}), &doc, "Example Product", BASE),
        Some("https://cdn.example.com/p/hero.jpg".to_string())
    );
}

#[test]
fn scored_img_scan_skips_logos_and_placeholders() {
    let title = "Nature's Way Kids Smart Vita Gummies Multi-Vitamin + Vegies 60 Gummies";
    let doc = Html::parse_document(&format!(
        r#"<html><body>
          <img id="header-logo" src="https://static.example.com/images/site_logo.png" alt="Site logo" />
          <img class="sub_image" src="https://static.example.com/ams/media/pi/62714/2DF_50.jpg" alt="{title}" />
          <img class="sub_image" src="https://static.example.com/ams/media/pi/62714/ADD3_50.jpg" alt="{title}" />
          <img src="https://static.example.com/App_Themes/Images/NoImage.jpg" alt="placeholder" />
        </body></html>"#
    ));
    assert_eq!(
        extract_image_url(&json!({}), &doc, title, BASE),
        Some("https://static.example.com/ams/media/pi/62714/2DF_50.jpg".to_string())
    );
}

#[test]
fn script_urls_are_unescaped_and_used_last() {
    let doc = Html::parse_document(
        r#"<html><body>
          <script>
            window.__PRODUCT__ = {"heroImage":"https:\/\/cdn.example.com\/images\/sku-123-main.webp"};
          </script>
        </body></html>"#,
    );
    assert_eq!(
        extract_image_url(&json!({}), &doc, "Example Product", BASE),
        Some("https://cdn.example.com/images/sku-123-main.webp".to_string())
    );
}

#[test]
fn relative_candidates_resolve_against_base() {
    let product = json!({ "image": "/images/p/123.jpg" });
    let doc = Html::parse_document("<html></html>");
    assert_eq!(
        extract_image_url(&product, &doc, "Product", BASE),
        Some("https://example.com/images/p/123.jpg".to_string())
    );
}
