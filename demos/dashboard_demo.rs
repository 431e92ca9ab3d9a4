use chrono::{Duration, NaiveDate};
use invoice_tracker::*;

fn main() {
    println!("📊 Invoice Dashboard Demo\n");

    let now = NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();

    let mut ledger = InvoiceLedger::new();
    let drafts = [
        ("Acme Corp", 4200.0, InvoiceStatus::Paid, 3),
        ("Globex", 1800.0, InvoiceStatus::Unpaid, 9),
        ("Initech", 950.0, InvoiceStatus::Overdue, 21),
        ("Umbrella", 2600.0, InvoiceStatus::PartiallyPaid, 45),
        ("Hooli", 3100.0, InvoiceStatus::Paid, 70),
        ("Vandelay", 700.0, InvoiceStatus::Disputed, 120),
    ];

    for (client, amount, status, days_ago) in drafts {
        let draft = InvoiceDraft {
            client_name: client.to_string(),
            amount,
            due_date: (now - Duration::days(days_ago)).date() + Duration::days(30),
            status,
        };
        if let Err(e) = ledger.create(draft, now - Duration::days(days_ago)) {
            eprintln!("❌ Could not create invoice for {}: {}", client, e);
            return;
        }
    }

    println!("📋 Ledger ({} invoices, newest first):", ledger.len());
    for invoice in ledger.invoices() {
        println!(
            "  {}  {:<10} {:>10.2}  {:<14} {}",
            invoice.id,
            invoice.client_name,
            invoice.amount,
            invoice.status,
            invoice.created_at.date()
        );
    }

    let dashboard = InvoiceDashboard::default();

    for period in [Period::OneMonth, Period::ThreeMonths, Period::OneYear] {
        let selection = FilterSelection::new(StatusFilter::All, period);
        let view = dashboard.derive(ledger.invoices(), &selection, now);
        print_view(&format!("{:?}", period), &view);
    }

    let empty = FilterSelection::custom(
        StatusFilter::Only(InvoiceStatus::Disputed),
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
    );
    print_view("Custom Q1, Disputed only", &dashboard.derive(ledger.invoices(), &empty, now));

    if let Err(e) = ledger.update_status("INV-0002", InvoiceStatus::Paid) {
        eprintln!("❌ Status update failed: {}", e);
        return;
    }
    let selection = FilterSelection::new(StatusFilter::All, Period::OneMonth);
    print_view(
        "OneMonth after INV-0002 was paid",
        &dashboard.derive(ledger.invoices(), &selection, now),
    );
}

fn print_view(title: &str, view: &DashboardView) {
    println!("\n🔎 {}", title);
    if view.is_synthetic() {
        println!("  ⚠️  No matching invoices; showing synthetic placeholder data");
    }
    println!("  Total earnings:  {:>10.2}", view.kpis.total_earnings);
    println!("  Payment awaited: {:>10.2}", view.kpis.payment_awaited);
    println!("  Payment overdue: {:>10.2}", view.kpis.payment_overdue);
    println!("  Income series (thousands):");
    for bucket in &view.series {
        println!(
            "    {:<16} {:>8.2}k  {:>+8.1}%",
            bucket.label, bucket.income, bucket.growth_pct
        );
    }
}
