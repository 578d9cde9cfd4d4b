// ============================================================
// CONSOLE OUTPUT
// ============================================================
// Render an AnalysisReport as text listings or JSON

use std::io::{self, Write};

use crate::application::{AnalysisReport, StorefrontReport};
use crate::domain::catalog::{AppRow, FrequencyTable};
use crate::domain::error::Result;
use crate::interfaces::cli::OutputFormat;

/// Write the report to stdout in the requested format
pub fn print_report(report: &AnalysisReport, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => render_text(report, &mut out)?,
        OutputFormat::Json => render_json(report, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

pub fn render_json<W: Write>(report: &AnalysisReport, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

pub fn render_text<W: Write>(report: &AnalysisReport, out: &mut W) -> io::Result<()> {
    render_storefront(&report.google_play, out)?;
    render_storefront(&report.app_store, out)?;
    Ok(())
}

fn render_storefront<W: Write>(report: &StorefrontReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "===== {} =====", report.storefront)?;
    writeln!(out, "{:?}", report.sample.header)?;
    writeln!(out)?;
    writeln!(out)?;
    for row in &report.sample.rows {
        write_row(row, out)?;
        writeln!(out)?;
        writeln!(out)?;
    }
    writeln!(out, "Number of rows: {}", report.sample.row_count)?;
    writeln!(out, "Number of columns: {}", report.sample.column_count)?;
    writeln!(out)?;

    for row in &report.removed_rows {
        writeln!(out, "Removed malformed row {}:", row.position)?;
        write_row(row, out)?;
        writeln!(out)?;
    }

    if let Some(duplicates) = &report.duplicates {
        writeln!(out, "Number of duplicate apps: {}", duplicates.duplicate_count())?;
        writeln!(out, "Number of unique apps: {}", duplicates.unique_count)?;
        let examples: Vec<&str> = duplicates
            .duplicate_names
            .iter()
            .take(15)
            .map(String::as_str)
            .collect();
        if !examples.is_empty() {
            writeln!(out, "Examples of duplicate apps: {:?}", examples)?;
        }
        writeln!(out)?;
    }

    let stages = &report.stages;
    writeln!(out, "Rows loaded: {}", stages.loaded)?;
    writeln!(out, "Rows after removing malformed rows: {}", stages.after_malformed)?;
    writeln!(out, "Rows after deduplication: {}", stages.after_dedup)?;
    writeln!(out, "Rows after English filter: {}", stages.after_english)?;
    writeln!(out, "Rows after free filter: {}", stages.after_free)?;
    writeln!(out)?;

    writeln!(out, "{} (% of free English apps):", report.category_name)?;
    write_frequencies(&report.category_frequencies, out)?;
    writeln!(out)?;

    if let (Some(name), Some(table)) = (&report.genres_name, &report.genre_frequencies) {
        writeln!(out, "{} (% of free English apps):", name)?;
        write_frequencies(table, out)?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "Average {} by {}:",
        report.metric_name, report.category_name
    )?;
    for average in &report.category_averages {
        writeln!(out, "{} : {}", average.key, average.average)?;
    }
    writeln!(out)?;

    if let Some(category) = &report.spotlight_category {
        writeln!(out, "Popular {} apps:", category)?;
        for app in &report.spotlight {
            writeln!(out, "{} : {}", app.name, app.metric)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn write_row<W: Write>(row: &AppRow, out: &mut W) -> io::Result<()> {
    writeln!(out, "{:?}", row.fields)
}

fn write_frequencies<W: Write>(table: &FrequencyTable, out: &mut W) -> io::Result<()> {
    for entry in table.sorted() {
        writeln!(out, "{} : {}", entry.value, entry.percentage)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ProfitabilityAnalysis;
    use crate::domain::catalog::{AnalysisConfig, Dataset, Storefront};
    use crate::infrastructure::csv::CsvParser;

    const PLAY_CSV: &str = "\
App,Category,Rating,Reviews,Size,Installs,Type,Price,Content Rating,Genres,Last Updated,Current Ver,Android Ver
Bible,BOOKS_AND_REFERENCE,4.7,2440695,Varies with device,\"1,000,000+\",Free,0,Teen,Books & Reference,\"July 31, 2018\",Varies with device,Varies with device
Bible,BOOKS_AND_REFERENCE,4.7,2440000,Varies with device,\"500,000+\",Free,0,Teen,Books & Reference,\"July 31, 2018\",Varies with device,Varies with device
Instagram,SOCIAL,4.5,66577313,Varies with device,\"1,000,000,000+\",Free,0,Teen,Social,\"July 31, 2018\",Varies with device,Varies with device";

    const STORE_CSV: &str = "\
id,track_name,size_bytes,currency,price,rating_count_tot,rating_count_ver,user_rating,user_rating_ver,ver,cont_rating,prime_genre,sup_devices.num,ipadSc_urls.num,lang.num,vpp_lic
284882215,Facebook,389879808,USD,0.0,2974676,212,3.5,3.5,95.0,4+,Social Networking,37,1,29,1
529479190,Clash of Clans,116476928,USD,0.0,2130805,579,4.5,4.5,9.24.12,9+,Games,38,5,18,1";

    fn report() -> AnalysisReport {
        let parser = CsvParser::new();
        let android: Dataset = parser.parse_content(PLAY_CSV, Storefront::GooglePlay).unwrap();
        let ios: Dataset = parser.parse_content(STORE_CSV, Storefront::AppStore).unwrap();

        let mut config = AnalysisConfig::default();
        config.google_play.malformed_rows.clear();
        ProfitabilityAnalysis::new(config).run_on(&android, &ios).unwrap()
    }

    #[test]
    fn test_render_text_listings() {
        let mut out = Vec::new();
        render_text(&report(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("===== Google Play ====="));
        assert!(text.contains("===== App Store ====="));
        assert!(text.contains("Number of rows: 3"));
        assert!(text.contains("Number of columns: 16"));
        assert!(text.contains("Number of duplicate apps: 1"));
        assert!(text.contains("SOCIAL : 50"));
        assert!(text.contains("Average Installs by Category:"));
        assert!(text.contains("SOCIAL : 1000000000"));
        assert!(text.contains("Games : 2130805"));
        assert!(text.contains("Popular BOOKS_AND_REFERENCE apps:\nBible : 1,000,000+"));
    }

    #[test]
    fn test_render_json_round_trips_counts() {
        let mut out = Vec::new();
        render_json(&report(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["google_play"]["stages"]["after_free"], 2);
        assert_eq!(value["app_store"]["storefront"], "app_store");
    }
}
