//! Result rendering for the terminal.

use std::io::Write;

use graf_client::{Dashboard, NormalizedAlert};

/// Write dashboards as a table or JSON.
pub fn dashboards(out: &mut impl Write, dashboards: &[Dashboard], json: bool) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, dashboards)?;
        writeln!(out)?;
        return Ok(());
    }
    for dashboard in dashboards {
        match &dashboard.folder_title {
            Some(folder) => writeln!(out, "{}\t{} ({folder})", dashboard.url, dashboard.title)?,
            None => writeln!(out, "{}\t{}", dashboard.url, dashboard.title)?,
        }
    }
    Ok(())
}

/// Write alerts as a table or JSON.
pub fn alerts(out: &mut impl Write, alerts: &[NormalizedAlert], json: bool) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, alerts)?;
        writeln!(out)?;
        return Ok(());
    }
    for alert in alerts {
        writeln!(out, "{}\t{}\t{}", alert.state, alert.name, alert.url)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graf_client::{AlertState, RuleState};

    #[test]
    fn alert_table_shows_the_na_sentinel() {
        let items = vec![NormalizedAlert {
            name: "My Rule".to_string(),
            url: "http://localhost/alerting/grafana/u1/view".to_string(),
            state: RuleState::NotAvailable,
        }];
        let mut buf = Vec::new();
        alerts(&mut buf, &items, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("n/a\tMy Rule\t"));
    }

    #[test]
    fn alert_json_uses_state_strings() {
        let items = vec![NormalizedAlert {
            name: "X".to_string(),
            url: "http://localhost/u".to_string(),
            state: RuleState::Known(AlertState::Alerting),
        }];
        let mut buf = Vec::new();
        alerts(&mut buf, &items, true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"Alerting\""));
    }
}
