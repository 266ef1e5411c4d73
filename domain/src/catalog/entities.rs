//! Catalog entities

use crate::analysis::ChartId;
use serde::{Deserialize, Serialize};

/// A source table known to the assistant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescription {
    pub name: String,
    pub columns: Vec<String>,
    pub description: String,
}

impl TableDescription {
    pub fn new(
        name: impl Into<String>,
        columns: &[&str],
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            description: description.into(),
        }
    }
}

/// An aggregation that has already been computed and charted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializedQuery {
    pub chart: ChartId,
    pub sql: String,
}

/// The static description of available data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCatalog {
    /// Persona line opening the system message
    pub preamble: String,
    pub tables: Vec<TableDescription>,
    /// Numbered by their chart id
    pub materialized: Vec<MaterializedQuery>,
}

impl DataCatalog {
    /// Catalog of the e-commerce company: monthly sales, categorised costs
    /// and tax, with revenue-by-month and cost-by-category materialized.
    pub fn ecommerce() -> Self {
        Self {
            preamble: "You are a data scientist working for an e-commerce company.".to_string(),
            tables: vec![
                TableDescription::new(
                    "Sales",
                    &["date", "revenue"],
                    "This table contains revenue earned at each month.",
                ),
                TableDescription::new(
                    "Costs",
                    &["datetime", "category", "amount"],
                    "This table contains costs at each month divided by different categories \
                     (such as, utilities, logistics, ...). This table does not include costs due to tax.",
                ),
                TableDescription::new(
                    "Tax",
                    &["datetime", "amount", "is_paid"],
                    "This table contains amount of tax at each month. \
                     The column is_paid shows whether this amount is paid or not.",
                ),
            ],
            materialized: vec![
                MaterializedQuery {
                    chart: ChartId::RevenueOverTime,
                    sql: "select year(datetime), month(datetime), sum(revenue) from Sales \
                          group by year(datetime), month(datetime);"
                        .to_string(),
                },
                MaterializedQuery {
                    chart: ChartId::CostBreakdown,
                    sql: "select sum(amount) from Costs group by category;".to_string(),
                },
            ],
        }
    }

    /// The materialized query behind a chart
    pub fn materialized_query(&self, chart: ChartId) -> Option<&MaterializedQuery> {
        self.materialized.iter().find(|m| m.chart == chart)
    }

    /// Render the catalog as the system context text
    pub fn render(&self) -> String {
        let mut text = format!(
            "{} Following tables are available to you:\n",
            self.preamble
        );

        for table in &self.tables {
            text.push_str(&format!(
                "{} ({}):\n{}\n\n",
                table.name,
                table.columns.join(", "),
                table.description
            ));
        }

        if !self.materialized.is_empty() {
            text.push_str("You have already created data using following sql queries:\n");
            for query in &self.materialized {
                text.push_str(&format!("{}. {}\n", query.chart.number(), query.sql));
            }
        }

        text
    }
}

impl Default for DataCatalog {
    fn default() -> Self {
        Self::ecommerce()
    }
}
