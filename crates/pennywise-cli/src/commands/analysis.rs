//! Analysis command implementations (insights, stats, budget, forecast, alerts, health)

use anyhow::Result;

use pennywise_core::insights::{
    Alert, BudgetRecommendations, FinancialHealth, Grade, Pattern, Predictions, Severity, Stats,
    TrendDirection,
};

use super::{print_json, run_analysis, GlobalOpts};
use crate::cli::InputArgs;

const RULE: &str = "   ─────────────────────────────────────────────────────────────";

fn header(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", RULE);
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "ℹ️ ",
        Severity::Warning => "⚠️ ",
        Severity::Critical => "🚨",
    }
}

fn print_stats(stats: &Stats) {
    header("📊 Spending Stats");
    println!("   Total spent:         ${:.2}", stats.total);
    println!("   Transactions:        {}", stats.transaction_count);
    println!("   Active days:         {}", stats.active_days);
    println!("   Avg per transaction: ${:.2}", stats.avg_per_transaction);
    println!("   Projected monthly:   ${:.2}", stats.monthly_expenses);

    if stats.has_income() {
        println!("   Monthly income:      ${:.2}", stats.monthly_income);
        println!("   Expense ratio:       {:.1}%", stats.expense_ratio);
        println!("   Savings rate:        {:.1}%", stats.savings_rate);
    } else {
        println!("   Monthly income:      (not set, use --income)");
    }
    if stats.income_count > 0 {
        println!(
            "   Recorded incomes:    {} totalling ${:.2}",
            stats.income_count, stats.income_total
        );
    }

    if stats.category_totals.is_empty() {
        return;
    }

    println!();
    println!("   {:<12} {:>12} {:>8}", "Category", "Amount", "Share");
    for entry in &stats.category_totals {
        let share = if stats.total > 0.0 {
            entry.amount / stats.total * 100.0
        } else {
            0.0
        };
        let marker = if stats.highest_category == Some(entry.category) {
            " ◀"
        } else {
            ""
        };
        println!(
            "   {:<12} {:>12} {:>7.1}%{}",
            entry.category.as_str(),
            format!("${:.2}", entry.amount),
            share,
            marker
        );
    }
}

fn print_patterns(patterns: &[Pattern]) {
    header("🔎 Spending Patterns");
    if patterns.is_empty() {
        println!("   No notable patterns.");
        return;
    }
    for pattern in patterns {
        println!("   {} {}", severity_icon(pattern.severity), pattern.message);
        println!("      → {}", pattern.suggestion);
    }
}

fn print_budget(budget: &BudgetRecommendations) {
    header("💰 Budget Recommendations");
    println!("   {}", budget.guideline);
    println!();
    println!(
        "   {:<12} {:>6} {:>13} {:>13}",
        "Category", "Share", "Recommended", "Current"
    );
    for s in &budget.suggestions {
        let over = if s.current > s.recommended { " ⚠️" } else { "" };
        println!(
            "   {:<12} {:>5.0}% {:>13} {:>13}{}",
            s.category.as_str(),
            s.percentage * 100.0,
            format!("${:.0}", s.recommended),
            format!("${:.2}", s.current),
            over
        );
    }
}

fn print_forecast(predictions: Option<&Predictions>) {
    header("📈 Forecast");
    let Some(p) = predictions else {
        println!("   Not enough expenses to forecast yet (need at least 3).");
        return;
    };

    let arrow = match p.trend {
        TrendDirection::Increasing => "↑",
        TrendDirection::Decreasing => "↓",
    };
    println!("   Predicted monthly:  ${:.2}", p.predicted_monthly);
    println!(
        "   Trend:              {} {} {:.1}%",
        arrow, p.trend, p.trend_percentage
    );
    println!(
        "   Recent vs older:    ${:.2} vs ${:.2} per transaction",
        p.recent_average, p.older_average
    );
    println!("   Confidence:         {}", p.confidence.as_str());
    if p.predicted_ratio > 0.0 {
        println!("   Share of income:    {:.1}%", p.predicted_ratio);
    }
}

fn print_alerts(alerts: &[Alert]) {
    if alerts.is_empty() {
        println!();
        println!("✅ No alerts. Your spending looks good!");
        return;
    }
    header("⚠️  Alerts");
    for alert in alerts {
        println!("   {} {}", severity_icon(alert.severity), alert.title);
        println!("      {}", alert.message);
        println!("      → {}", alert.action);
    }
}

fn print_health(health: &FinancialHealth) {
    header("🩺 Financial Health");
    if health.grade == Grade::Unknown {
        println!("   Score: n/a");
    } else {
        println!("   Score: {:.0}/100  Grade: {}", health.score, health.grade);
    }
    println!("   {}", health.status);

    if !health.recommendations.is_empty() {
        println!();
        for rec in &health.recommendations {
            println!("   [{}] {}", rec.priority.as_str(), rec.title);
            println!("      {}", rec.message);
            println!("      → {}", rec.action);
        }
    }
}

fn print_tips(tips: &[String]) {
    header("💡 Tips");
    for tip in tips {
        println!("   • {}", tip);
    }
}

pub fn cmd_insights(input: &InputArgs, opts: &GlobalOpts) -> Result<()> {
    let insights = run_analysis(input, opts)?;
    if opts.json {
        return print_json(&insights);
    }

    print_stats(&insights.stats);
    print_patterns(&insights.patterns);
    print_budget(&insights.budget_recommendations);
    print_forecast(insights.predictions.as_ref());
    print_alerts(&insights.alerts);
    print_health(&insights.financial_health);
    print_tips(&insights.personalized_tips);
    println!();

    Ok(())
}

pub fn cmd_stats(input: &InputArgs, opts: &GlobalOpts) -> Result<()> {
    let insights = run_analysis(input, opts)?;
    if opts.json {
        return print_json(&insights.stats);
    }
    print_stats(&insights.stats);
    println!();
    Ok(())
}

pub fn cmd_budget(input: &InputArgs, opts: &GlobalOpts) -> Result<()> {
    let insights = run_analysis(input, opts)?;
    if opts.json {
        return print_json(&insights.budget_recommendations);
    }
    print_budget(&insights.budget_recommendations);
    println!();
    Ok(())
}

pub fn cmd_forecast(input: &InputArgs, opts: &GlobalOpts) -> Result<()> {
    let insights = run_analysis(input, opts)?;
    if opts.json {
        return print_json(&insights.predictions);
    }
    print_forecast(insights.predictions.as_ref());
    println!();
    Ok(())
}

pub fn cmd_alerts(input: &InputArgs, opts: &GlobalOpts) -> Result<()> {
    let insights = run_analysis(input, opts)?;
    if opts.json {
        return print_json(&insights.alerts);
    }
    print_alerts(&insights.alerts);
    println!();
    Ok(())
}

pub fn cmd_health(input: &InputArgs, opts: &GlobalOpts) -> Result<()> {
    let insights = run_analysis(input, opts)?;
    if opts.json {
        return print_json(&insights.financial_health);
    }
    print_health(&insights.financial_health);
    println!();
    Ok(())
}
