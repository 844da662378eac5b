//! Plain-text rendering of the page checklist and the estimate summary.

use crate::models::{Estimate, EstimateOutcome, PageOverview, Role};

/// Render pages grouped by category, in first-seen category order.
///
/// Example output:
/// ```text
/// Sales
/// ├── Overview  5 h  12.5%
/// └── Details   3 h   7.5%
/// ```
pub fn render_page_table(pages: &[PageOverview]) -> String {
    let mut categories: Vec<&str> = Vec::new();
    for page in pages {
        if !categories.contains(&page.category.as_str()) {
            categories.push(&page.category);
        }
    }

    let name_width = pages.iter().map(|p| p.name.chars().count()).max().unwrap_or(0);
    let hours_width = pages
        .iter()
        .map(|p| p.estimated_time.to_string().len())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for category in categories {
        output.push_str(category);
        output.push('\n');

        let rows: Vec<&PageOverview> = pages.iter().filter(|p| p.category == category).collect();
        for (i, page) in rows.iter().enumerate() {
            let branch = if i == rows.len() - 1 { "└── " } else { "├── " };
            output.push_str(&format!(
                "{}{:<name_width$}  {:>hours_width$} h  {:>5.1}%\n",
                branch,
                page.name,
                page.estimated_time,
                page.percent_of_total * 100.0,
            ));
        }
    }
    output
}

/// Render the project summary, or what is still missing.
pub fn render_outcome(outcome: &EstimateOutcome) -> String {
    match outcome {
        EstimateOutcome::Complete { estimate } => render_summary(estimate),
        EstimateOutcome::Incomplete { missing } => {
            let roles: Vec<&str> = missing.iter().map(Role::as_str).collect();
            format!("Choose a {} to see the estimate.\n", roles.join(" and a "))
        }
    }
}

pub fn render_summary(estimate: &Estimate) -> String {
    let rows = [
        ("Pages", estimate.page_time),
        ("Deployment tasks", estimate.deployment_time),
        ("Power Query (ETL)", estimate.etl_time),
        ("Data modeling", estimate.modeling_time),
    ];

    let mut output = String::new();
    for (label, hours) in rows {
        output.push_str(&format!("{:<18} {} hours\n", format!("{}:", label), hours));
    }
    output.push_str(&format!(
        "Project manager:   {}\n",
        estimate.manager.label()
    ));
    output.push_str(&format!(
        "Developer:         {}\n",
        estimate.developer.label()
    ));
    output.push_str(&format!(
        "Total Estimated Time: {} hours\n",
        estimate.total_time
    ));
    output.push_str(&format!(
        "Total Estimated Cost: ${:.2}\n",
        estimate.total_cost
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Person;

    fn row(name: &str, category: &str, hours: f64, share: f64) -> PageOverview {
        PageOverview {
            id: 0,
            name: name.to_string(),
            category: category.to_string(),
            estimated_time: hours,
            percent_of_total: share,
        }
    }

    #[test]
    fn groups_pages_by_category() {
        let output = render_page_table(&[
            row("Overview", "Sales", 5.0, 0.5),
            row("Churn", "Customers", 2.0, 0.2),
            row("Details", "Sales", 3.0, 0.3),
        ]);

        assert_eq!(
            output,
            "Sales\n├── Overview  5 h   50.0%\n└── Details   3 h   30.0%\nCustomers\n└── Churn     2 h   20.0%\n"
        );
    }

    #[test]
    fn empty_table_renders_nothing() {
        assert_eq!(render_page_table(&[]), "");
    }

    #[test]
    fn summary_shows_cost_with_two_decimals() {
        let estimate = Estimate {
            page_time: 5.0,
            deployment_time: 0.0,
            etl_time: 5.0,
            modeling_time: 10.0,
            total_time: 20.0,
            manager: Person {
                name: "Maya".into(),
                hourly_rate: 75.0,
            },
            developer: Person {
                name: "Dev".into(),
                hourly_rate: 50.0,
            },
            total_cost: 2500.0,
        };

        let output = render_summary(&estimate);
        assert!(output.contains("Total Estimated Time: 20 hours\n"));
        assert!(output.contains("Total Estimated Cost: $2500.00\n"));
        assert!(output.contains("Maya - 75 $ per hour"));
    }

    #[test]
    fn incomplete_outcome_names_missing_roles() {
        let output = render_outcome(&EstimateOutcome::Incomplete {
            missing: vec![Role::Manager, Role::Developer],
        });
        assert_eq!(output, "Choose a manager and a developer to see the estimate.\n");
    }
}
