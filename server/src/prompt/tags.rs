use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// The fixed classification vocabulary, in prompt order.
///
/// The string form of each variant is the exact label the model must return;
/// `FromStr` is case-sensitive and is the only admissibility check for tags.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    IntoStaticStr,
    EnumString,
    EnumIter,
    EnumCount,
    Serialize,
    Deserialize,
)]
pub enum Tag {
    #[strum(serialize = "Bug Report")]
    #[serde(rename = "Bug Report")]
    BugReport,
    #[strum(serialize = "Billing Issue")]
    #[serde(rename = "Billing Issue")]
    BillingIssue,
    Praise,
    Complaint,
    #[strum(serialize = "Feature Request")]
    #[serde(rename = "Feature Request")]
    FeatureRequest,
    #[strum(serialize = "Technical Support")]
    #[serde(rename = "Technical Support")]
    TechnicalSupport,
    #[strum(serialize = "Sales Inquiry")]
    #[serde(rename = "Sales Inquiry")]
    SalesInquiry,
    #[strum(serialize = "Security Concern")]
    #[serde(rename = "Security Concern")]
    SecurityConcern,
    #[strum(serialize = "Spam/Irrelevant")]
    #[serde(rename = "Spam/Irrelevant")]
    SpamIrrelevant,
    #[strum(serialize = "Refund Request")]
    #[serde(rename = "Refund Request")]
    RefundRequest,
    #[strum(serialize = "Shipping/Delivery")]
    #[serde(rename = "Shipping/Delivery")]
    ShippingDelivery,
    Other,
}

impl Tag {
    pub const FALLBACK: Tag = Tag::Other;

    pub fn guidance(&self) -> &'static str {
        match self {
            Tag::BugReport => "Issues with software, errors, crashes, or technical problems",
            Tag::BillingIssue => "Problems with charges, invoices, or payment",
            Tag::Praise => "Positive feedback, compliments, or appreciation",
            Tag::Complaint => "Negative feedback, dissatisfaction, or criticism",
            Tag::FeatureRequest => "Suggestions for new features or improvements",
            Tag::TechnicalSupport => "Questions about using the product or service",
            Tag::SalesInquiry => "Questions about pricing, products, or purchasing",
            Tag::SecurityConcern => "Issues related to security, privacy, or data protection",
            Tag::SpamIrrelevant => "Unwanted messages or irrelevant content",
            Tag::RefundRequest => "Requests for money back or cancellation",
            Tag::ShippingDelivery => "Issues with delivery, shipping, or order status",
            Tag::Other => "Messages that don't fit any of the above categories",
        }
    }

    /// Exact-match lookup; anything outside the vocabulary is `None`.
    pub fn parse_label(label: &str) -> Option<Tag> {
        label.parse().ok()
    }

    pub fn fallback_list() -> Vec<Tag> {
        vec![Tag::FALLBACK]
    }

    pub fn label(self) -> &'static str {
        self.into()
    }

    pub fn labels() -> Vec<&'static str> {
        Tag::iter().map(Tag::label).collect()
    }
}

/// Joins tags the way they are shown in exports: `"Billing Issue, Complaint"`.
pub fn join_tags(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_order() {
        assert_eq!(Tag::COUNT, 12);
        assert_eq!(
            Tag::labels(),
            vec![
                "Bug Report",
                "Billing Issue",
                "Praise",
                "Complaint",
                "Feature Request",
                "Technical Support",
                "Sales Inquiry",
                "Security Concern",
                "Spam/Irrelevant",
                "Refund Request",
                "Shipping/Delivery",
                "Other",
            ]
        );
    }

    #[test]
    fn test_display_matches_label() {
        for tag in Tag::iter() {
            assert_eq!(tag.to_string(), tag.label());
            assert_eq!(Tag::parse_label(tag.label()), Some(tag));
            assert!(!tag.guidance().is_empty());
        }
    }

    #[test]
    fn test_parse_label_is_exact() {
        assert_eq!(Tag::parse_label("Spam/Irrelevant"), Some(Tag::SpamIrrelevant));
        assert_eq!(Tag::parse_label("praise"), None);
        assert_eq!(Tag::parse_label("Bug report"), None);
        assert_eq!(Tag::parse_label(" Praise"), None);
        assert_eq!(Tag::parse_label("BugReport"), None);
        assert_eq!(Tag::parse_label("Urgent"), None);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&vec![Tag::ShippingDelivery, Tag::Other]).unwrap();
        assert_eq!(json, r#"["Shipping/Delivery","Other"]"#);

        let tags: Vec<Tag> = serde_json::from_str(r#"["Bug Report","Praise"]"#).unwrap();
        assert_eq!(tags, vec![Tag::BugReport, Tag::Praise]);
    }

    #[test]
    fn test_join_tags() {
        assert_eq!(join_tags(&[Tag::Other, Tag::Complaint]), "Other, Complaint");
        assert_eq!(join_tags(&[Tag::Praise]), "Praise");
    }
}
