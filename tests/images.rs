use hck_terminal::images::{
    CLUB_LOGO_URL, FALLBACK_IMAGE_URL, article_image, normalize_image_url, team_logo,
};
use hck_terminal::model::Article;

#[test]
fn absolute_urls_pass_through() {
    assert_eq!(
        normalize_image_url(Some("https://cdn.example.com/a.jpg")),
        "https://cdn.example.com/a.jpg"
    );
    assert_eq!(
        normalize_image_url(Some("  http://cdn.example.com/a.jpg ")),
        "http://cdn.example.com/a.jpg"
    );
}

#[test]
fn protocol_relative_gets_https() {
    assert_eq!(
        normalize_image_url(Some("//cdn.hckosice.sk/x.png")),
        "https://cdn.hckosice.sk/x.png"
    );
}

#[test]
fn site_relative_gets_club_origin() {
    assert_eq!(
        normalize_image_url(Some("/data/images/x.jpg")),
        "https://www.hckosice.sk/data/images/x.jpg"
    );
}

#[test]
fn img_markup_yields_its_source() {
    assert_eq!(
        normalize_image_url(Some(r#"<img class="a" src="/foto/1.jpg" alt="">"#)),
        "https://www.hckosice.sk/foto/1.jpg"
    );
    assert_eq!(
        normalize_image_url(Some("<IMG SRC='//cdn.x/2.jpg'>")),
        "https://cdn.x/2.jpg"
    );
}

#[test]
fn unusable_values_fall_back() {
    let unusable = [
        None,
        Some(""),
        Some("   "),
        Some("null"),
        Some("not-a-url"),
        Some("obrazok.jpg"),
        Some("<img alt=x>"),
    ];
    for raw in unusable {
        assert_eq!(normalize_image_url(raw), FALLBACK_IMAGE_URL, "{raw:?}");
    }
}

#[test]
fn article_image_prefers_card_then_header_then_generic() {
    let mut article = Article {
        image: Some("/generic.jpg".to_string()),
        header_image_url: Some("/header.jpg".to_string()),
        card_image_url: Some("/card.jpg".to_string()),
        ..Article::default()
    };
    assert_eq!(article_image(&article), "https://www.hckosice.sk/card.jpg");
    article.card_image_url = Some("  ".to_string());
    assert_eq!(article_image(&article), "https://www.hckosice.sk/header.jpg");
    article.header_image_url = None;
    assert_eq!(article_image(&article), "https://www.hckosice.sk/generic.jpg");
    article.image = None;
    assert_eq!(article_image(&article), FALLBACK_IMAGE_URL);
}

#[test]
fn club_logo_is_recognised_by_name() {
    assert_eq!(team_logo(None, "HC KOŠICE"), CLUB_LOGO_URL);
    assert_eq!(team_logo(Some(""), "HC Košice juniori"), CLUB_LOGO_URL);
    assert_eq!(team_logo(None, "HK Nitra"), FALLBACK_IMAGE_URL);
    assert_eq!(
        team_logo(Some("//cdn.x/nitra.png"), "HK Nitra"),
        "https://cdn.x/nitra.png"
    );
}
