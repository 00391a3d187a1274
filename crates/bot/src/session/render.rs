//! Message rendering: menu labels and the texts/button grids the
//! controller replies with.

use divano_core::MINOR_PER_MAJOR;

use crate::cart::Receipt;
use crate::catalog::{CatalogItem, ProductCodeTable};

use super::action::CallbackAction;
use super::reply::{ActionButton, InvoiceRequest, LabeledPrice, Reply};

/// Reply-keyboard label that opens the cart view.
pub const CART_LABEL: &str = "🛒 Cart";
/// Reply-keyboard label that prompts for a search query.
pub const SEARCH_LABEL: &str = "🔍 Search by name";
/// Reply-keyboard label on the contact-share button.
pub const SHARE_PHONE_LABEL: &str = "📱 Share phone number";
/// Reply-keyboard label that links to the loyalty-points bot.
pub const POINTS_LABEL: &str = "🎯 Check points";

const CATEGORIES_PER_ROW: usize = 2;

/// Format a major-unit amount with the configured currency symbol.
#[must_use]
pub fn format_price(amount: i64, symbol: &str) -> String {
    format!("{amount}{symbol}")
}

/// The main menu: contact share, category buttons, cart and search.
#[must_use]
pub fn main_menu(table: &ProductCodeTable, loyalty: bool) -> Reply {
    let mut rows = vec![vec![SHARE_PHONE_LABEL.to_string()]];

    let names: Vec<String> = table.categories().map(ToString::to_string).collect();
    for chunk in names.chunks(CATEGORIES_PER_ROW) {
        rows.push(chunk.to_vec());
    }

    let mut bottom = vec![CART_LABEL.to_string(), SEARCH_LABEL.to_string()];
    if loyalty {
        bottom.push(POINTS_LABEL.to_string());
    }
    rows.push(bottom);

    Reply::Menu {
        text: "Pick a furniture category, or share your phone number to place a request:"
            .to_string(),
        rows,
        request_contact: true,
    }
}

/// The re-prompt shown when checkout is attempted without a phone number.
#[must_use]
pub fn phone_request() -> Reply {
    Reply::Menu {
        text: "📱 Please share your phone number before checking out:".to_string(),
        rows: vec![vec![SHARE_PHONE_LABEL.to_string()]],
        request_contact: true,
    }
}

/// One browsable item with its add-to-cart button.
#[must_use]
pub fn item_card(item: &CatalogItem, symbol: &str) -> Reply {
    Reply::Card {
        text: format!(
            "{}\nPrice: {}\nAvailable: {} pcs.",
            item.name,
            format_price(item.price, symbol),
            item.quantity
        ),
        actions: vec![vec![ActionButton::new(
            "🛒 Add to cart",
            CallbackAction::Add(item.code.clone()),
        )]],
    }
}

/// The itemized cart view with per-line quantity controls and the checkout,
/// clear and back actions.
#[must_use]
pub fn cart_view(receipt: &Receipt, symbol: &str) -> Reply {
    let mut text = String::from("<b>🛒 Your cart:</b>\n");
    let mut actions = Vec::new();

    for line in &receipt.lines {
        text.push_str(&format!(
            "{} — {} × {} = {}\n",
            line.name,
            format_price(line.unit_price, symbol),
            line.quantity,
            format_price(line.line_total, symbol)
        ));
        actions.push(vec![
            ActionButton::new(
                format!("➖ {}", line.name),
                CallbackAction::Decrease(line.code.clone()),
            ),
            ActionButton::new(format!("{} pcs.", line.quantity), CallbackAction::Noop),
            ActionButton::new("➕", CallbackAction::Increase(line.code.clone())),
        ]);
    }

    text.push_str(&format!(
        "\n<b>💰 Total: {}</b>",
        format_price(receipt.total, symbol)
    ));

    actions.push(vec![ActionButton::new(
        "📩 Send request",
        CallbackAction::SendRequest,
    )]);
    actions.push(vec![ActionButton::new("💳 Pay", CallbackAction::PayInline)]);
    actions.push(vec![ActionButton::new(
        "🗑 Clear cart",
        CallbackAction::ClearCart,
    )]);
    actions.push(vec![ActionButton::new(
        "⬅️ Back to menu",
        CallbackAction::BackToMain,
    )]);

    Reply::Card { text, actions }
}

/// The itemized summary delivered to the operator on a manual request.
#[must_use]
pub fn operator_summary(receipt: &Receipt, phone: &str, symbol: &str) -> String {
    let mut text = String::from("<b>📥 New request</b>\n");
    text.push_str(&format!("<b>📱 Phone:</b> {phone}\n"));
    text.push_str("<b>🛒 Cart:</b>\n");

    for line in &receipt.lines {
        text.push_str(&format!(
            "{} — {} × {} = {}\n",
            line.name,
            format_price(line.unit_price, symbol),
            line.quantity,
            format_price(line.line_total, symbol)
        ));
    }

    text.push_str(&format!(
        "\n<b>💰 Total: {}</b>",
        format_price(receipt.total, symbol)
    ));
    text
}

/// A payment-session request covering every receipt line.
#[must_use]
pub fn invoice(receipt: &Receipt, payload: String, currency: &str) -> InvoiceRequest {
    let prices: Vec<LabeledPrice> = receipt
        .lines
        .iter()
        .map(|line| LabeledPrice {
            label: format!("{} × {}", line.name, line.quantity),
            amount_minor: line.line_total * MINOR_PER_MAJOR,
        })
        .collect();

    let description = prices
        .iter()
        .map(|p| p.label.clone())
        .collect::<Vec<_>>()
        .join(", ");

    InvoiceRequest {
        title: "Furniture order".to_string(),
        description,
        payload,
        currency: currency.to_string(),
        prices,
    }
}
