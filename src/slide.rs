use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An image shown on a slide. Relative paths resolve against the assets directory.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ImageRef {
    pub path: String,
    /// Hover text, and the fallback label if the image can't be loaded
    pub alt: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// One panel of the deck.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Slide {
    Title {
        text: String,
    },
    Announcement {
        text: String,
        image: ImageRef,
    },
    Venue {
        date: NaiveDate,
        place: String,
        image: ImageRef,
    },
    Invitation {
        caption: String,
        image: ImageRef,
        link: Option<Link>,
    },
}

impl ImageRef {
    pub fn new(path: &str, alt: &str) -> Self {
        Self {
            path: path.to_string(),
            alt: alt.to_string(),
        }
    }

    /// URI for the egui image loaders.
    pub fn uri(&self, assets_dir: &Path) -> String {
        if self.path.contains("://") {
            return self.path.clone();
        }
        let path = Path::new(&self.path);
        if path.is_absolute() {
            format!("file://{}", path.display())
        } else {
            format!("file://{}", assets_dir.join(path).display())
        }
    }
}

impl Slide {
    pub fn name(&self) -> &'static str {
        match self {
            Slide::Title { .. } => "title",
            Slide::Announcement { .. } => "announcement",
            Slide::Venue { .. } => "venue",
            Slide::Invitation { .. } => "invitation",
        }
    }

    pub fn image(&self) -> Option<&ImageRef> {
        match self {
            Slide::Title { .. } => None,
            Slide::Announcement { image, .. }
            | Slide::Venue { image, .. }
            | Slide::Invitation { image, .. } => Some(image),
        }
    }
}

/// "Saturday, July 25, 2026"
pub fn format_event_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn default_deck() -> Vec<Slide> {
    vec![
        Slide::Title {
            text: "Save the Date!".to_string(),
        },
        Slide::Announcement {
            text: "Chandler and Sully are getting married!".to_string(),
            image: ImageRef::new("US-WC-Alter.png", "Couple"),
        },
        Slide::Venue {
            date: NaiveDate::from_ymd_opt(2026, 7, 25).unwrap_or_default(),
            image: ImageRef::new("Admirals-WC.png", "Venue watercolor"),
            place: "The Admiral's House, Seattle, WA".to_string(),
        },
        Slide::Invitation {
            image: ImageRef::new("Admirals-Us-WC.png", "Venue watercolor with couple"),
            caption: "Formal Invitations to Follow".to_string(),
            link: Some(Link {
                label: "Visit our wedding website".to_string(),
                url: "https://www.theknot.com/chandlerandsully".to_string(),
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_deck() {
        let deck = default_deck();
        let kinds: Vec<_> = deck.iter().map(Slide::name).collect();
        assert_eq!(kinds, ["title", "announcement", "venue", "invitation"]);
        assert!(deck[0].image().is_none());
        assert_eq!(deck[1].image().map(|i| i.alt.as_str()), Some("Couple"));
    }

    #[test]
    fn test_event_date_format() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 25).expect("valid date");
        assert_eq!(format_event_date(date), "Saturday, July 25, 2026");
    }

    #[test]
    fn test_image_uri() {
        let assets = PathBuf::from("/srv/assets");
        let relative = ImageRef::new("clouds.png", "Clouds");
        assert_eq!(relative.uri(&assets), "file:///srv/assets/clouds.png");

        let absolute = ImageRef::new("/tmp/us.png", "Us");
        assert_eq!(absolute.uri(&assets), "file:///tmp/us.png");

        let remote = ImageRef::new("https://example.com/a.png", "A");
        assert_eq!(remote.uri(&assets), "https://example.com/a.png");
    }

    #[test]
    fn test_slide_from_toml() {
        let slide: Slide = toml::from_str(
            r#"
            kind = "venue"
            date = "2027-05-01"
            place = "Somewhere"
            image = { path = "v.png", alt = "Venue" }
            "#,
        )
        .expect("Failed to parse slide");
        match slide {
            Slide::Venue { date, place, .. } => {
                assert_eq!(format_event_date(date), "Saturday, May 1, 2027");
                assert_eq!(place, "Somewhere");
            }
            other => panic!("unexpected slide {:?}", other),
        }
    }

    #[test]
    fn test_invitation_link_is_optional() {
        let slide: Slide = toml::from_str(
            r#"
            kind = "invitation"
            caption = "See you there"
            image = { path = "x.png", alt = "X" }
            "#,
        )
        .expect("Failed to parse slide");
        assert!(matches!(slide, Slide::Invitation { link: None, .. }));
    }
}
