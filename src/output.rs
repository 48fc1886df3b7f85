use std::fs::File;
use std::io::Write;

use log::info;
use serde::{Deserialize, Serialize};

use crate::api::{DomainOutcome, ScanReport};
use crate::error::Result;
use crate::handle::{Finding, SummaryStats};
use crate::input::OutputFormat;

/// 可序列化的发现结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableFinding {
    #[serde(flatten)]
    pub finding: Finding,
    pub formatted_time: String,
}

/// 完整的导出数据结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    pub findings: Vec<SerializableFinding>,
    pub report: ScanReport,
    pub summary: SummaryStats,
    pub export_time: String,
}

impl From<Finding> for SerializableFinding {
    fn from(finding: Finding) -> Self {
        let formatted_time = chrono::DateTime::from_timestamp(finding.timestamp as i64, 0)
            .unwrap_or_default()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        SerializableFinding {
            finding,
            formatted_time,
        }
    }
}

/// 导出结果到文件
pub fn export_results(
    findings: Vec<Finding>,
    report: ScanReport,
    summary: SummaryStats,
    output_path: &str,
    format: OutputFormat,
) -> Result<()> {
    let export_data = ExportData {
        findings: findings.into_iter().map(Into::into).collect(),
        report,
        summary,
        export_time: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    };

    let content = render(&export_data, format)?;
    let mut file = File::create(output_path)?;
    file.write_all(content.as_bytes())?;

    info!("结果已导出到: {}", output_path);
    Ok(())
}

fn render(data: &ExportData, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::Csv => export_to_csv(data),
        OutputFormat::Txt => export_to_txt(data),
    })
}

/// 导出为CSV格式
fn export_to_csv(data: &ExportData) -> String {
    let mut csv = String::new();
    csv.push_str("Host,Domain,IPs,Timestamp,FormattedTime\n");
    for item in &data.findings {
        let ips = item
            .finding
            .addrs
            .addrs()
            .iter()
            .map(|ip| ip.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            escape_csv(&item.finding.host),
            escape_csv(&item.finding.domain),
            escape_csv(&ips),
            item.finding.timestamp,
            escape_csv(&item.formatted_time)
        ));
    }
    csv
}

/// 导出为TXT格式
fn export_to_txt(data: &ExportData) -> String {
    let mut txt = String::new();

    txt.push_str("rsubbrute 扫描结果报告\n");
    txt.push_str(&format!("导出时间: {}\n", data.export_time));
    txt.push_str(&format!("{}\n\n", "=".repeat(60)));

    txt.push_str("域名扫描状态:\n");
    for domain in &data.report.domains {
        let status = match domain.outcome {
            DomainOutcome::Completed => "完成".to_string(),
            DomainOutcome::Skipped(reason) => format!("跳过 ({:?})", reason),
        };
        txt.push_str(&format!(
            "  {:<30} {:<16} 查询: {:<8} 发现: {}\n",
            domain.domain, status, domain.attempted, domain.findings
        ));
    }
    txt.push('\n');

    txt.push_str("汇总统计:\n");
    txt.push_str(&format!("  发现子域名总数: {}\n", data.summary.total_findings));
    txt.push_str(&format!("  唯一IP数量: {}\n\n", data.summary.unique_ips.len()));

    txt.push_str("发现的子域名:\n");
    txt.push_str(&format!("{}\n", "-".repeat(80)));
    for item in &data.findings {
        txt.push_str(&format!("{} {}\n", item.finding.host, item.finding.addrs));
    }

    txt
}

/// CSV转义
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
