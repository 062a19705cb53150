//! Plain-text views of the cart, catalog and checkout form.

use agrofarm_cart::{CartStore, CheckoutFlow, LoadState, Notice};
use agrofarm_client::FarmerAccount;
use agrofarm_core::{format_rupees, CheckoutField, PaymentMethod, Product, Session};

/// Truncate to `max` characters, marking the cut with `...`.
fn clip(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

pub(crate) fn cart(store: &CartStore) -> String {
    let mut out = String::new();
    match store.load_state() {
        LoadState::Loading => return "loading cart...".to_string(),
        LoadState::Failed(message) => {
            return format!("error: {message}\n(type `retry` to try again)");
        }
        LoadState::Idle | LoadState::Loaded => {}
    }

    if store.cart().is_empty() {
        return "your cart is empty; browse with `products` and `add <id>`".to_string();
    }

    out.push_str(&format!(
        "{:<26}{:<28}{:>10}{:>6}{:>12}\n",
        "ID", "PRODUCT", "PRICE", "QTY", "TOTAL"
    ));
    for item in store.cart().items() {
        out.push_str(&format!(
            "{:<26}{:<28}{:>10}{:>6}{:>12}\n",
            clip(&item.product_id, 24),
            clip(&item.name, 25),
            format_rupees(item.price),
            item.quantity,
            format_rupees(item.line_total()),
        ));
    }

    let totals = store.totals();
    out.push('\n');
    out.push_str(&format!("Subtotal: {}\n", format_rupees(totals.subtotal)));
    if let Some(promo) = store.promo() {
        out.push_str(&format!(
            "Discount ({}): -{}\n",
            promo.code(),
            format_rupees(totals.discount)
        ));
    }
    out.push_str(&format!("Total:    {}", format_rupees(totals.total)));
    out
}

pub(crate) fn products(products: &[&Product]) -> String {
    if products.is_empty() {
        return "no products match".to_string();
    }
    let mut out = format!(
        "{:<26}{:<28}{:<14}{:>10}{:>8}\n",
        "ID", "NAME", "CATEGORY", "PRICE", "STOCK"
    );
    for product in products {
        let price = match product.unit.as_deref() {
            Some(unit) => format!("{}/{unit}", format_rupees(product.price)),
            None => format_rupees(product.price),
        };
        out.push_str(&format!(
            "{:<26}{:<28}{:<14}{:>10}{:>8}\n",
            clip(&product.id, 24),
            clip(&product.name, 25),
            clip(product.category.as_deref().unwrap_or("\u{2014}"), 12),
            price,
            product
                .stock
                .map_or_else(|| "\u{2014}".to_string(), |s| s.to_string()),
        ));
    }
    out.pop();
    out
}

pub(crate) fn checkout(flow: &CheckoutFlow) -> String {
    let Some(form) = flow.form() else {
        return "checkout is closed; type `checkout` to begin".to_string();
    };
    let mut out = String::from(if flow.is_submitting() {
        "Placing order...\n"
    } else {
        "Checkout\n"
    });
    for field in [
        CheckoutField::FullName,
        CheckoutField::PhoneNumber,
        CheckoutField::Street,
        CheckoutField::City,
        CheckoutField::ZipCode,
        CheckoutField::Notes,
    ] {
        let required = if CheckoutField::REQUIRED.contains(&field) {
            "*"
        } else {
            " "
        };
        out.push_str(&format!("  {required}{:<14}{}", field.label(), form.value(field)));
        if let Some(message) = flow.field_errors().and_then(|e| e.get(field)) {
            out.push_str(&format!("   <- {message}"));
        }
        out.push('\n');
    }
    out.push_str("   Payment: ");
    let methods: Vec<String> = PaymentMethod::ALL
        .iter()
        .map(|m| {
            if *m == form.payment_method {
                format!("[{}]", m.label())
            } else {
                m.label().to_string()
            }
        })
        .collect();
    out.push_str(&methods.join("  "));
    if let Some(error) = flow.error() {
        out.push_str(&format!("\nerror: {error}"));
    }
    out
}

pub(crate) fn whoami(session: &Session) -> String {
    match session.user() {
        Some(user) => {
            let since = session
                .signed_in_at()
                .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_default();
            format!("{} <{}> ({}) since {since}", user.name, user.email, user.role)
        }
        None => "not signed in".to_string(),
    }
}

pub(crate) fn account(account: &FarmerAccount) -> String {
    let field = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or("\u{2014}")
            .to_string()
    };
    format!(
        "Name:    {}\nEmail:   {}\nPhone:   {}\nAddress: {}",
        field(&account.name),
        field(&account.email),
        field(&account.phone),
        field(&account.address),
    )
}

pub(crate) fn notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_marks_truncation() {
        assert_eq!(clip("Basmati Rice", 20), "Basmati Rice");
        assert_eq!(clip("Organic Fertilizer Mix", 7), "Organic...");
    }

    #[test]
    fn closed_checkout_hint() {
        let flow = CheckoutFlow::default();
        assert!(checkout(&flow).contains("type `checkout`"));
    }

    #[test]
    fn account_marks_missing_fields() {
        let farmer = FarmerAccount {
            name: Some("Ahmad Khan".to_string()),
            phone: Some(" ".to_string()),
            ..FarmerAccount::default()
        };
        let text = account(&farmer);
        assert!(text.contains("Name:    Ahmad Khan"));
        assert!(text.contains("Phone:   \u{2014}"));
    }

    #[test]
    fn signed_out_whoami() {
        assert_eq!(whoami(&Session::default()), "not signed in");
    }
}
