//! Savings goal display formatting

use crate::models::SavingsGoal;

/// Format goals with progress bars
pub fn format_goal_list(goals: &[SavingsGoal], symbol: &str) -> String {
    if goals.is_empty() {
        return "No savings goals. Create one with 'savings create'.\n".to_string();
    }

    let mut output = String::new();
    for goal in goals {
        let bar = super::progress_bar(goal.progress_percent(), 20);
        let status = if goal.closed {
            " (closed)"
        } else if goal.is_reached() {
            " ✓ reached"
        } else {
            ""
        };

        output.push_str(&format!(
            "{} {}{}\n  {} {} of {}",
            goal.emoji,
            goal.name,
            status,
            bar,
            goal.current_amount.format_with_symbol(symbol),
            goal.target_amount.format_with_symbol(symbol),
        ));

        if let Some(target_date) = goal.target_date {
            output.push_str(&format!("  (by {})", target_date.format("%Y-%m-%d")));
        }
        output.push('\n');
    }

    output
}
