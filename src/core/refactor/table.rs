//! The replacement table: ordered literal (from → to) pairs.

use serde::Serialize;

/// One literal substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

/// Ordered replacement pairs, unique on the `from` side.
///
/// Pairs are applied in insertion order. None of the built-in `from` tokens is
/// a substring of another, but the order is still kept so runs reproduce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplacementTable {
    pairs: Vec<Replacement>,
}

/// Flat `state.*_service` fields → grouped `state.commerce.*` / `state.system.*` accessors.
const STATE_GROUP_PAIRS: &[(&str, &str)] = &[
    ("state.product_service", "state.commerce.product"),
    ("state.inventory_service", "state.commerce.inventory"),
    ("state.pricing_service", "state.commerce.pricing"),
    ("state.transaction_service", "state.commerce.transactions"),
    ("state.buylist_service", "state.commerce.buylist"),
    ("state.holds_service", "state.commerce.holds"),
    ("state.payment_service", "state.commerce.payments"),
    ("state.tax_service", "state.commerce.taxes"),
    ("state.returns_service", "state.commerce.returns"),
    ("state.trade_in_protection_service", "state.commerce.trade_in"),
    ("state.audit_service", "state.system.audit"),
    ("state.event_service", "state.system.events"),
    ("state.barcode_service", "state.system.barcode"),
    ("state.receipt_service", "state.system.receipts"),
    ("state.invoice_service", "state.system.invoices"),
    ("state.label_service", "state.system.labels"),
    ("state.cash_drawer_service", "state.system.cash_drawer"),
    ("state.printer_service", "state.system.printers"),
    ("state.catalog_lookup_service", "state.system.catalog"),
    ("state.serialized_inventory_service", "state.system.serialized"),
    ("state.location_service", "state.system.locations"),
    ("state.reporting_service", "state.system.reporting"),
    ("state.email_service", "state.system.email"),
    ("state.sms_service", "state.system.sms"),
    ("state.notification_scheduler", "state.system.notification_scheduler"),
];

impl ReplacementTable {
    /// The built-in application-state migration table.
    pub fn state_groups() -> Self {
        Self {
            pairs: STATE_GROUP_PAIRS
                .iter()
                .map(|(from, to)| Replacement {
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Replacement> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            pairs: pairs
                .iter()
                .map(|(from, to)| Replacement {
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
        }
    }
}
