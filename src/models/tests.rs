use super::{LiquidityReport, Status, TransactionRecord};

use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;

#[test]
fn test_status_classifies_known_spellings() {
    for raw in ["Completed", "completed", "Complete", "Success", "success"] {
        assert_eq!(Status::classify(raw), Status::Completed, "status: {raw:?}");
    }

    for raw in ["Pending", "pending", "In Progress", "Processing"] {
        assert_eq!(Status::classify(raw), Status::Pending, "status: {raw:?}");
    }

    for raw in ["Refunded", "refunded", "Reversed", "Cancelled", "cancelled"] {
        assert_eq!(Status::classify(raw), Status::Refunded, "status: {raw:?}");
    }
}

#[test]
fn test_status_falls_back_to_other_for_unknown_text() {
    for raw in ["", "Denied", "COMPLETED", "Held", "reversed", "Partially Refunded"] {
        assert_eq!(Status::classify(raw), Status::Other, "status: {raw:?}");
    }
}

#[test]
fn test_new_record_defaults_every_optional_field() {
    let record = TransactionRecord::new("TX1");

    assert_eq!(record.transaction_id, "TX1");
    assert!(record.date.is_empty());
    assert!(record.currency.is_empty());
    assert!(record.gross.is_zero());
    assert!(record.balance.is_zero());
    assert_eq!(record.status(), Status::Other);
}

#[test]
fn test_record_serializes_type_under_its_export_name() -> Result<()> {
    let record = TransactionRecord {
        transaction_type: "Payment".to_string(),
        gross: Decimal::from_str("10.50")?,
        ..TransactionRecord::new("TX1")
    };

    let value = serde_json::to_value(&record)?;

    assert_eq!(value["type"], "Payment");
    assert_eq!(value["transaction_id"], "TX1");
    assert_eq!(value["gross"], "10.50");

    Ok(())
}

#[test]
fn test_report_serializes_every_field_by_name() -> Result<()> {
    let value = serde_json::to_value(LiquidityReport::default())?;
    let object = value.as_object().ok_or_else(|| anyhow::anyhow!("report is not an object"))?;

    for key in [
        "total_gross", "total_fees", "total_net", "final_balance", "transaction_count",
        "by_currency", "completed_count", "pending_count", "refunded_count"
    ] {
        assert!(object.contains_key(key), "missing key {key}");
    }

    assert_eq!(object.len(), 9);

    Ok(())
}
