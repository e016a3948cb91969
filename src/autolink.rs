//! Auto-link: a default linear NEXT chain over the text sequence
//!
//! Destructive by nature. Callers must surface a confirmation step before
//! replacing the flow collection with the result; `FlowSheet::apply_auto_link`
//! enforces that with [`Confirmation`].

use std::sync::Arc;

use crate::model::{FlowRecord, TextRecord};

/// Explicit answer to a destructive-operation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Confirmation {
    Confirmed,
    #[default]
    Unconfirmed,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Unconfirmed
        }
    }
}

/// One NEXT record per adjacent pair; the last line gets none
pub fn auto_link(texts: &[Arc<TextRecord>]) -> Vec<FlowRecord> {
    texts
        .windows(2)
        .map(|pair| FlowRecord::next(pair[0].uid.clone(), pair[1].uid.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransitionType;

    fn texts(n: usize) -> Vec<Arc<TextRecord>> {
        (0..n)
            .map(|i| Arc::new(TextRecord::new(format!("T{}", i), "", "")))
            .collect()
    }

    #[test]
    fn test_auto_link_chain() {
        let flows = auto_link(&texts(4));
        assert_eq!(flows.len(), 3);
        for (i, flow) in flows.iter().enumerate() {
            assert_eq!(flow.from_uid, format!("T{}", i));
            assert_eq!(flow.to_uid, format!("T{}", i + 1));
            assert_eq!(flow.transition_type, TransitionType::Next);
            assert_eq!(flow.disp_order, 0);
        }
    }

    #[test]
    fn test_auto_link_short_sequences() {
        assert!(auto_link(&texts(0)).is_empty());
        assert!(auto_link(&texts(1)).is_empty());
    }

    #[test]
    fn test_confirmation_from_bool() {
        assert_eq!(Confirmation::from(true), Confirmation::Confirmed);
        assert_eq!(Confirmation::from(false), Confirmation::Unconfirmed);
    }
}
