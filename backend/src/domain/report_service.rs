//! DRE and CMV report logic.
//!
//! Derives the income-statement subtotals from the raw figures the
//! user enters, renders the statement as labeled lines and exports it
//! as CSV. Export values are raw numbers with two decimals, never the
//! locale-formatted display strings.

use anyhow::Result;
use chrono::Local;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use shared::{DreInput, DreLine, DreStatement};

/// Report service that computes DRE statements and CMV
#[derive(Clone)]
pub struct ReportService {
    // No internal state needed for now
}

impl ReportService {
    /// Create a new ReportService instance
    pub fn new() -> Self {
        Self {}
    }

    /// Compute every derived subtotal of the DRE from its inputs
    pub fn dre_statement(&self, input: DreInput) -> DreStatement {
        let net_revenue = input.gross_revenue - input.deductions;
        let gross_profit = net_revenue - input.cmv;
        let operating_result = gross_profit - input.operating_expenses;
        let result_before_tax = operating_result + input.financial_result;
        let net_profit = result_before_tax - input.tax_estimate;

        DreStatement {
            input,
            net_revenue,
            gross_profit,
            operating_result,
            result_before_tax,
            net_profit,
        }
    }

    /// Cost of goods sold: opening stock plus purchases minus closing
    /// stock
    pub fn cmv(&self, opening_stock: f64, purchases: f64, closing_stock: f64) -> f64 {
        opening_stock + purchases - closing_stock
    }

    /// The DRE as ordered display lines, subtracted figures negated
    pub fn dre_lines(&self, statement: &DreStatement) -> Vec<DreLine> {
        let input = &statement.input;
        vec![
            DreLine { label: "Receita Bruta".to_string(), value: input.gross_revenue },
            DreLine { label: "(-) Deduções".to_string(), value: -input.deductions },
            DreLine { label: "Receita Líquida".to_string(), value: statement.net_revenue },
            DreLine { label: "(-) CMV".to_string(), value: -input.cmv },
            DreLine { label: "Lucro Bruto".to_string(), value: statement.gross_profit },
            DreLine { label: "(-) Despesas Operacionais".to_string(), value: -input.operating_expenses },
            DreLine { label: "Resultado Operacional".to_string(), value: statement.operating_result },
            DreLine { label: "Resultado Financeiro".to_string(), value: input.financial_result },
            DreLine { label: "Resultado Antes dos Impostos".to_string(), value: statement.result_before_tax },
            DreLine { label: "(-) Impostos".to_string(), value: -input.tax_estimate },
            DreLine { label: "Lucro Líquido".to_string(), value: statement.net_profit },
        ]
    }

    /// Render the DRE as CSV content
    ///
    /// Header `descricao,valor`, one quote-escaped description per row
    /// and the raw value with two decimals.
    pub fn dre_csv(&self, statement: &DreStatement) -> String {
        let mut csv_content = String::new();
        csv_content.push_str("descricao,valor\n");

        for line in self.dre_lines(statement) {
            let row = format!(
                "\"{}\",{:.2}\n",
                line.label.replace("\"", "\"\""),
                line.value
            );
            csv_content.push_str(&row);
        }

        csv_content
    }

    /// Write the DRE CSV to `directory`, or the user's documents folder
    /// when none is given; returns the full path written
    pub fn export_dre_csv(
        &self,
        statement: &DreStatement,
        directory: Option<&Path>,
    ) -> Result<PathBuf> {
        let directory = match directory {
            Some(dir) => dir.to_path_buf(),
            None => dirs::document_dir().unwrap_or_else(std::env::temp_dir),
        };
        fs::create_dir_all(&directory)?;

        let filename = format!("dre_{}.csv", Local::now().format("%Y%m%d"));
        let path = directory.join(filename);
        let csv_content = self.dre_csv(statement);
        fs::write(&path, &csv_content)?;

        info!(
            "📄 REPORT: Exported DRE CSV ({} bytes) to {}",
            csv_content.len(),
            path.display()
        );
        Ok(path)
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> DreInput {
        DreInput {
            gross_revenue: 100000.0,
            deductions: 8000.0,
            cmv: 35000.0,
            operating_expenses: 22000.0,
            financial_result: -1500.0,
            tax_estimate: 6000.0,
        }
    }

    #[test]
    fn test_dre_derivations() {
        let service = ReportService::new();
        let statement = service.dre_statement(sample_input());

        assert_eq!(statement.net_revenue, 92000.0);
        assert_eq!(statement.gross_profit, 57000.0);
        assert_eq!(statement.operating_result, 35000.0);
        assert_eq!(statement.result_before_tax, 33500.0);
        assert_eq!(statement.net_profit, 27500.0);
    }

    #[test]
    fn test_cmv_formula() {
        let service = ReportService::new();
        assert_eq!(service.cmv(10000.0, 25000.0, 8000.0), 27000.0);
        assert_eq!(service.cmv(0.0, 0.0, 0.0), 0.0);
        // Closing stock above opening plus purchases gives a negative CMV
        assert_eq!(service.cmv(1000.0, 0.0, 3000.0), -2000.0);
    }

    #[test]
    fn test_csv_has_header_and_raw_values() {
        let service = ReportService::new();
        let statement = service.dre_statement(sample_input());
        let csv = service.dre_csv(&statement);

        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "descricao,valor");
        assert!(csv.contains("\"Receita Bruta\",100000.00"));
        assert!(csv.contains("\"(-) Deduções\",-8000.00"));
        assert!(csv.contains("\"Resultado Financeiro\",-1500.00"));
        assert!(csv.contains("\"Lucro Líquido\",27500.00"));
    }

    #[test]
    fn test_csv_negative_values_are_plain_numbers() {
        let service = ReportService::new();
        let statement = service.dre_statement(DreInput {
            gross_revenue: 1000.0,
            deductions: 500.0,
            cmv: 0.0,
            operating_expenses: 0.0,
            financial_result: -500.0,
            tax_estimate: 0.0,
        });
        let csv = service.dre_csv(&statement);

        assert!(csv.contains(",-500.00"));
        assert!(!csv.contains("(R$"));
    }

    #[test]
    fn test_csv_escapes_quotes_in_labels() {
        let service = ReportService::new();
        // dre_lines labels are fixed, so exercise the escaping directly
        // through a statement rendered to CSV rows.
        let statement = service.dre_statement(sample_input());
        let csv = service.dre_csv(&statement);
        for line in csv.lines().skip(1) {
            assert!(line.starts_with('"'));
        }
    }

    #[test]
    fn test_export_writes_file() {
        let service = ReportService::new();
        let statement = service.dre_statement(sample_input());
        let dir = tempfile::tempdir().unwrap();

        let path = service.export_dre_csv(&statement, Some(dir.path())).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(path.file_name().unwrap().to_string_lossy().starts_with("dre_"));
        assert!(content.starts_with("descricao,valor"));
    }
}
