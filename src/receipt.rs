//! # Sales Receipts
//!
//! The receipt data model and the formatter that lays a completed sale out as
//! an ESC/POS command stream.
//!
//! ## Layout
//!
//! Every receipt has the same skeleton; only text and the number of item rows
//! vary:
//!
//! ```text
//!         SALONG NAVN              (double size, bold, centered)
//!         Storgata 1
//!         Tlf: 22 33 44 55
//!         post@salong.no
//!         Org.nr: 999 888 777
//!
//! ================================
//! Ordre: 1042
//! Dato: 19.10.2026
//! Tid: 14:05
//! --------------------------------
//!
//! 1x Herreklipp          500.00 kr
//! 1x Skjeggstuss         200.00 kr
//!
//! --------------------------------
//! Subtotal:              560.00 kr
//! MVA:                   140.00 kr
//! ================================
//! TOTAL:                 700.00 kr (double height, bold)
//! ================================
//!
//! Betalt med:                 KORT
//!
//!
//!       custom message (optional)
//!
//!        Takk for besøket!
//!        Velkommen tilbake!
//! ```
//!
//! Amounts are printed with two decimals and a `kr` suffix. The formatter
//! does not check that items add up to the totals: it prints what it is
//! given.

use serde::{Deserialize, Serialize};

use crate::encoder::CommandEncoder;
use crate::printer::PrinterConfig;
use crate::protocol::text::Alignment;

/// Currency suffix appended to every amount
pub const CURRENCY: &str = "kr";

const THANK_YOU: &str = "Takk for besøket!";
const SEE_YOU_AGAIN: &str = "Velkommen tilbake!";

// ============================================================================
// DATA MODEL
// ============================================================================

/// Header block identifying the business. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Business {
    pub business_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Tax registration (organisation) number
    pub org_number: String,
}

impl Business {
    /// Fill every empty field from `defaults`, keeping fields already set.
    pub fn with_defaults(mut self, defaults: &Business) -> Self {
        fn fill(field: &mut String, default: &str) {
            if field.is_empty() {
                *field = default.to_string();
            }
        }

        fill(&mut self.business_name, &defaults.business_name);
        fill(&mut self.address, &defaults.address);
        fill(&mut self.phone, &defaults.phone);
        fill(&mut self.email, &defaults.email);
        fill(&mut self.org_number, &defaults.org_number);
        self
    }
}

/// One sold service or product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
        }
    }
}

/// A completed sale, ready to print.
///
/// Date and time are pre-formatted by the caller. Totals are computed by the
/// caller and printed verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Receipt {
    #[serde(flatten)]
    pub business: Business,
    pub order_number: String,
    pub date: String,
    pub time: String,
    /// Printed in this order
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub payment_method: String,
    pub custom_message: Option<String>,
}

impl Receipt {
    /// Parse a receipt from its JSON representation.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The custom message, if there is one worth printing
    pub fn message(&self) -> Option<&str> {
        self.custom_message
            .as_deref()
            .filter(|message| !message.is_empty())
    }
}

// ============================================================================
// FORMATTER
// ============================================================================

/// Format an amount with two decimals and the currency suffix.
///
/// ```
/// use kvittering::receipt::format_amount;
///
/// assert_eq!(format_amount(500.0), "500.00 kr");
/// assert_eq!(format_amount(1234.5), "1234.50 kr");
/// ```
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2} {CURRENCY}")
}

/// Encode a receipt for 58 mm paper (32 columns).
pub fn format_receipt(receipt: &Receipt) -> Vec<u8> {
    format_receipt_for(receipt, &PrinterConfig::default())
}

/// Encode a receipt laid out for the given paper profile.
pub fn format_receipt_for(receipt: &Receipt, config: &PrinterConfig) -> Vec<u8> {
    let width = config.columns;
    let business = &receipt.business;
    let mut enc = CommandEncoder::new();

    enc.initialize();

    // Header
    enc.align(Alignment::Center)
        .size(2, 2)
        .bold(true)
        .println(&business.business_name)
        .size(1, 1)
        .bold(false)
        .println(&business.address)
        .println(&format!("Tlf: {}", business.phone))
        .println(&business.email)
        .println(&format!("Org.nr: {}", business.org_number))
        .feed(1)
        .line('=', width);

    // Order details
    enc.align(Alignment::Left)
        .println(&format!("Ordre: {}", receipt.order_number))
        .println(&format!("Dato: {}", receipt.date))
        .println(&format!("Tid: {}", receipt.time))
        .line('-', width)
        .feed(1);

    for item in &receipt.items {
        enc.columns(
            &format!("{}x {}", item.quantity, item.name),
            &format_amount(item.unit_price),
            width,
        );
    }

    // Totals
    enc.feed(1)
        .line('-', width)
        .columns("Subtotal:", &format_amount(receipt.subtotal), width)
        .columns("MVA:", &format_amount(receipt.tax), width)
        .line('=', width)
        .bold(true)
        .size(1, 2)
        .columns("TOTAL:", &format_amount(receipt.total), width)
        .size(1, 1)
        .bold(false)
        .line('=', width)
        .feed(1);

    enc.columns("Betalt med:", &receipt.payment_method, width)
        .feed(2);

    if let Some(message) = receipt.message() {
        enc.align(Alignment::Center).println(message).feed(1);
    }

    // Footer
    enc.align(Alignment::Center)
        .println(THANK_YOU)
        .println(SEE_YOU_AGAIN)
        .feed(3)
        .cut(false);

    enc.finalize()
}

/// Initialize the printer and kick the cash drawer, nothing else.
pub fn drawer_kick() -> Vec<u8> {
    let mut enc = CommandEncoder::new();
    enc.initialize().open_drawer();
    enc.finalize()
}

// ============================================================================
// DEMO
// ============================================================================

/// A sample salon sale stamped with the current local date and time.
pub fn demo_receipt() -> Receipt {
    let now = chrono::Local::now();

    Receipt {
        business: Business {
            business_name: "Salong Saks".into(),
            address: "Storgata 1, 0155 Oslo".into(),
            phone: "22 33 44 55".into(),
            email: "post@salongsaks.no".into(),
            org_number: "999 888 777".into(),
        },
        order_number: "1042".into(),
        date: now.format("%d.%m.%Y").to_string(),
        time: now.format("%H:%M").to_string(),
        items: vec![
            LineItem::new("Herreklipp", 1, 500.0),
            LineItem::new("Skjeggstuss", 1, 200.0),
        ],
        subtotal: 560.0,
        tax: 140.0,
        total: 700.0,
        payment_method: "KORT".into(),
        custom_message: Some("Husk å bestille neste time!".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::decode::{self, Command};
    use crate::protocol::commands::CutMode;
    use pretty_assertions::assert_eq;

    fn sample() -> Receipt {
        Receipt {
            business: Business {
                business_name: "Salong".into(),
                ..Default::default()
            },
            order_number: "7".into(),
            date: "01.02.2026".into(),
            time: "10:00".into(),
            items: vec![
                LineItem::new("Herreklipp", 1, 500.0),
                LineItem::new("Skjeggstuss", 1, 200.0),
            ],
            subtotal: 560.0,
            tax: 140.0,
            total: 700.0,
            payment_method: "KORT".into(),
            custom_message: None,
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0.00 kr");
        assert_eq!(format_amount(99.999), "100.00 kr");
        assert_eq!(format_amount(-12.5), "-12.50 kr");
        assert_eq!(format_amount(1_000_000.0), "1000000.00 kr");
    }

    #[test]
    fn test_item_rows_in_order() {
        let text = decode::plain_text(&format_receipt(&sample()));
        let first = text.find("1x Herreklipp").unwrap();
        let second = text.find("1x Skjeggstuss").unwrap();
        assert!(first < second);
        assert!(text.contains(&format!("1x Herreklipp{}500.00 kr\n", " ".repeat(10))));
    }

    #[test]
    fn test_starts_with_init_ends_with_full_cut() {
        let bytes = format_receipt(&sample());
        assert_eq!(&bytes[..2], &[0x1B, 0x40]);
        assert_eq!(&bytes[bytes.len() - 3..], &[0x1D, 0x56, 0x00]);
        assert_eq!(
            decode::commands(&bytes).last(),
            Some(&Command::Cut(CutMode::Full))
        );
    }

    #[test]
    fn test_total_row_is_bold_double_height() {
        let commands = decode::commands(&format_receipt(&sample()));
        let tall = commands
            .iter()
            .position(|c| *c == Command::Size { width: 1, height: 2 })
            .unwrap();
        assert_eq!(commands[tall - 1], Command::Bold(true));
        assert_eq!(commands[tall + 1], Command::Size { width: 1, height: 1 });
        assert_eq!(commands[tall + 2], Command::Bold(false));
    }

    #[test]
    fn test_empty_message_adds_nothing() {
        let none = format_receipt(&sample());

        let mut empty = sample();
        empty.custom_message = Some(String::new());
        assert_eq!(format_receipt(&empty), none);

        let centers = decode::commands(&none)
            .into_iter()
            .filter(|c| *c == Command::Align(Alignment::Center))
            .count();
        // header + footer
        assert_eq!(centers, 2);
    }

    #[test]
    fn test_custom_message_centered() {
        let mut receipt = sample();
        receipt.custom_message = Some("God jul!".into());
        let bytes = format_receipt(&receipt);

        let centers = decode::commands(&bytes)
            .into_iter()
            .filter(|c| *c == Command::Align(Alignment::Center))
            .count();
        assert_eq!(centers, 3);
        assert!(decode::plain_text(&bytes).contains("God jul!\n\n"));
    }

    #[test]
    fn test_totals_not_validated() {
        let mut receipt = sample();
        receipt.total = -1.0;
        receipt.items.clear();
        let text = decode::plain_text(&format_receipt(&receipt));
        assert!(text.contains("-1.00 kr"));
        assert!(!text.contains("1x "));
    }

    #[test]
    fn test_wide_paper_profile() {
        let text = decode::plain_text(&format_receipt_for(&sample(), &PrinterConfig::MM80));
        assert!(text.contains(&format!("{}\n", "=".repeat(48))));
        assert!(!text.contains(&format!("{}\n", "=".repeat(49))));
    }

    #[test]
    fn test_business_defaults_fill_empty_fields() {
        let defaults = Business {
            business_name: "Default".into(),
            phone: "123".into(),
            ..Default::default()
        };
        let business = Business {
            business_name: "Own".into(),
            ..Default::default()
        }
        .with_defaults(&defaults);

        assert_eq!(business.business_name, "Own");
        assert_eq!(business.phone, "123");
        assert_eq!(business.email, "");
    }

    #[test]
    fn test_from_json() {
        let receipt = Receipt::from_json(
            r#"{
                "businessName": "Salong",
                "orderNumber": "7",
                "items": [{"name": "Herreklipp", "quantity": 1, "unitPrice": 500}],
                "subtotal": 400, "tax": 100, "total": 500,
                "paymentMethod": "VIPPS"
            }"#,
        )
        .unwrap();

        assert_eq!(receipt.business.business_name, "Salong");
        assert_eq!(receipt.items, vec![LineItem::new("Herreklipp", 1, 500.0)]);
        assert_eq!(receipt.payment_method, "VIPPS");
        assert_eq!(receipt.custom_message, None);
        assert_eq!(receipt.date, "");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Receipt::from_json("{\"items\": 3}").is_err());
    }

    #[test]
    fn test_drawer_kick() {
        assert_eq!(drawer_kick(), vec![0x1B, 0x40, 0x1B, 0x70, 0x00, 0x19, 0xFA]);
    }

    #[test]
    fn test_demo_receipt_prints() {
        let text = decode::plain_text(&format_receipt(&demo_receipt()));
        assert!(text.contains("Salong Saks"));
        assert!(text.contains("700.00 kr"));
    }
}
