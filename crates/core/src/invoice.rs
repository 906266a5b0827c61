//! Invoice structures
//!
//! The agent only assembles this structure; rendering it to a document
//! is the PDF renderer's concern.

use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A single line item on an invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub name: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl InvoiceItem {
    pub fn new(name: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Line total, rounded to 2 decimals
    pub fn line_total(&self) -> f64 {
        round2(self.quantity * self.unit_price)
    }
}

/// A finalized invoice handed to the document renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_gst: Option<String>,
    pub invoice_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Currency code, defaults to INR
    pub currency: String,
    /// Tax percentage applied to the subtotal
    pub tax_percent: f64,
    pub shipping_fee: f64,
    pub discount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    pub items: Vec<InvoiceItem>,
}

impl Invoice {
    /// Create a new invoice draft for a customer
    pub fn new(customer_name: impl Into<String>, customer_email: impl Into<String>) -> Self {
        Self {
            invoice_id: Uuid::new_v4().to_string(),
            invoice_number: None,
            customer_name: customer_name.into(),
            customer_email: customer_email.into(),
            customer_gst: None,
            invoice_date: Local::now().format("%Y-%m-%d").to_string(),
            due_date: None,
            currency: "INR".to_string(),
            tax_percent: 18.0,
            shipping_fee: 0.0,
            discount: 0.0,
            discount_code: None,
            items: Vec::new(),
        }
    }

    /// Add a line item
    pub fn with_item(mut self, item: InvoiceItem) -> Self {
        self.items.push(item);
        self
    }

    /// Sum of line totals, rounded to 2 decimals
    pub fn subtotal(&self) -> f64 {
        round2(self.items.iter().map(|i| i.line_total()).sum())
    }

    /// Tax amount over the subtotal, rounded to 2 decimals
    pub fn tax_amount(&self) -> f64 {
        round2(self.subtotal() * (self.tax_percent / 100.0))
    }

    /// Subtotal + tax + shipping - discount, rounded to 2 decimals
    pub fn grand_total(&self) -> f64 {
        round2(self.subtotal() + self.tax_amount() + self.shipping_fee - self.discount)
    }

    /// An invoice is renderable once it has at least one item
    pub fn is_complete(&self) -> bool {
        !self.items.is_empty() && !self.customer_name.is_empty() && !self.customer_email.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = InvoiceItem::new("T-shirt", 2.0, 500.0);
        assert_eq!(item.line_total(), 1000.0);
    }

    #[test]
    fn test_totals() {
        let invoice = Invoice::new("Asha", "asha@example.com")
            .with_item(InvoiceItem::new("T-shirt", 2.0, 500.0))
            .with_item(InvoiceItem::new("Mug", 1.0, 250.0));

        assert_eq!(invoice.subtotal(), 1250.0);
        // Default 18% GST
        assert_eq!(invoice.tax_amount(), 225.0);
        assert_eq!(invoice.grand_total(), 1475.0);
    }

    #[test]
    fn test_discount_and_shipping() {
        let mut invoice = Invoice::new("Ravi", "ravi@example.com")
            .with_item(InvoiceItem::new("Laptop", 1.0, 12999.0));
        invoice.shipping_fee = 100.0;
        invoice.discount = 500.0;

        let expected = invoice.subtotal() + invoice.tax_amount() + 100.0 - 500.0;
        assert_eq!(invoice.grand_total(), (expected * 100.0).round() / 100.0);
    }

    #[test]
    fn test_completeness() {
        let draft = Invoice::new("Asha", "asha@example.com");
        assert!(!draft.is_complete());

        let done = draft.with_item(InvoiceItem::new("Book", 1.0, 299.0));
        assert!(done.is_complete());
    }
}
