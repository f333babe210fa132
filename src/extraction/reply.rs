pub const NO_PRODUCTS_SENTINEL: &str = "No new products mentioned.";
pub const FIELD_DELIMITER: char = '|';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductMention {
    pub company: String,
    pub product: String,
    pub description: String,
}

/// How a model reply was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    Mention(ProductMention),
    /// Absent reply, or one carrying the sentinel.
    NoProduct,
    Malformed { segments: usize },
}

/// Turns a model reply of the form `Company | Product | Description` into its fields.
/// Only replies with exactly three segments and no sentinel yield a mention.
pub fn split_reply(reply: Option<&str>) -> ReplyOutcome {
    let reply = match reply {
        Some(reply) => reply,
        None => {
            log::debug!("No reply to split");
            return ReplyOutcome::NoProduct;
        }
    };

    if reply.contains(NO_PRODUCTS_SENTINEL) {
        log::debug!("No product announcement in reply");
        return ReplyOutcome::NoProduct;
    }

    let parts: Vec<&str> = reply.split(FIELD_DELIMITER).collect();
    match parts.as_slice() {
        [company, product, description] => ReplyOutcome::Mention(ProductMention {
            company: company.trim().to_string(),
            product: product.trim().to_string(),
            description: description.trim().to_string(),
        }),
        _ => {
            log::warn!(
                "Unexpected reply format ({} segments, expected 3): {}",
                parts.len(),
                reply
            );
            ReplyOutcome::Malformed {
                segments: parts.len(),
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_segments_are_trimmed() {
        assert_eq!(
            split_reply(Some("Acme Corp | Widget X | A new widget.")),
            ReplyOutcome::Mention(ProductMention {
                company: "Acme Corp".to_string(),
                product: "Widget X".to_string(),
                description: "A new widget.".to_string(),
            })
        );
    }

    #[test]
    fn test_sentinel_yields_no_product() {
        assert_eq!(
            split_reply(Some("No new products mentioned.")),
            ReplyOutcome::NoProduct
        );
        assert_eq!(
            split_reply(Some("After review: No new products mentioned.")),
            ReplyOutcome::NoProduct
        );
    }

    #[test]
    fn test_absent_reply_yields_no_product() {
        assert_eq!(split_reply(None), ReplyOutcome::NoProduct);
    }

    #[test]
    fn test_wrong_segment_counts_are_malformed() {
        assert_eq!(
            split_reply(Some("Acme Corp | Widget X")),
            ReplyOutcome::Malformed { segments: 2 }
        );
        assert_eq!(
            split_reply(Some("Acme | Widget | Desc | Extra")),
            ReplyOutcome::Malformed { segments: 4 }
        );
        assert_eq!(
            split_reply(Some("just prose, no delimiters")),
            ReplyOutcome::Malformed { segments: 1 }
        );
    }

    #[test]
    fn test_malformed_reply_logs_a_warning() {
        super::capture::install();

        split_reply(Some("Zenith Labs | Orbiter"));
        split_reply(Some("Zenith Labs | Orbiter | Satellite | Spare"));

        let notices = super::capture::warnings_containing("Zenith Labs | Orbiter");
        assert!(notices.iter().any(|m| m.contains("2 segments")), "{:?}", notices);
        assert!(notices.iter().any(|m| m.contains("4 segments")), "{:?}", notices);
    }

    #[test]
    fn test_empty_segments_still_count() {
        match split_reply(Some("Acme || ")) {
            ReplyOutcome::Mention(mention) => {
                assert_eq!(mention.company, "Acme");
                assert_eq!(mention.product, "");
                assert_eq!(mention.description, "");
            }
            other => panic!("expected a mention, got {:?}", other),
        }
    }
}
