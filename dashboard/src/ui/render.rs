//! Plain-text renderings of the two panels.

use shared::{format_eth, truncate_address, InvestmentStats};
use std::fmt::Write;

use crate::state::{CollectionList, Update};

/// Stats panel.
pub fn render_stats(stats: &InvestmentStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Investments for {}", truncate_address(stats.address.as_str()));
    let _ = writeln!(out, "  Spent:     {}", format_eth(stats.total_spent, 3));
    let _ = writeln!(out, "  Received:  {}", format_eth(stats.total_received, 3));
    let _ = writeln!(out, "  Profit:    {}", format_eth(stats.realized_profit(), 3));
    let _ = writeln!(
        out,
        "  Trades:    {} bought / {} sold",
        stats.bought_count, stats.sold_count
    );
    if let Some(balance) = stats.wallet_balance {
        let _ = writeln!(out, "  Balance:   {}", format_eth(balance, 3));
    }
    if let (Some(first), Some(last)) = (stats.first_trade_at, stats.last_trade_at) {
        let _ = writeln!(
            out,
            "  Active:    {} .. {}",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        );
    }
    out
}

/// Collections panel; hidden entries are left out and counted.
pub fn render_collections(list: &CollectionList) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Collections for {}", truncate_address(list.address.as_str()));

    let mut shown = 0;
    for entry in list.visible() {
        shown += 1;
        let floor = entry
            .stats
            .floor_price
            .map(|floor| format_eth(floor, 3))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "  {:<32} x{:<4} floor {}  [{}]",
            entry.name, entry.owned_asset_count, floor, entry.slug
        );
    }
    if shown == 0 {
        let _ = writeln!(out, "  (nothing to show)");
    }

    let hidden = list.hidden_count();
    if hidden > 0 {
        let _ = writeln!(out, "  {} hidden", hidden);
    }
    let _ = writeln!(out, "  Floor value: {}", format_eth(list.visible_floor_value(), 3));
    out
}

/// Either the rendered value or the panel's error state.
pub fn render_update<T>(title: &str, update: &Update<T>, render: impl Fn(&T) -> String) -> String {
    match update {
        Update::Resolved(value) => render(value),
        Update::Failed(err) => format!("{}: failed to load ({})\n", title, err),
    }
}
