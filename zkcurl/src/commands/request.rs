//! `zkcurl scan`, `zkcurl parse` and `zkcurl classify`.

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde::Serialize;
use std::io::{self, Write};

use zkcurl_core::{
    mask_private, parse, prepare_request, scan, MaskedParams, ParamSet, PreparedRequest,
    PrivateParamKeys, Variables, MASK,
};

use crate::cli::{ClassifyCommand, ParseCommand, ScanCommand};
use crate::commands::{info_msg, warn_msg};
use crate::ui::output_format::print_header;
use crate::ui::partition_table::build_partition_table;
use crate::ui::theme::ThemeMap;
use crate::utils::input::{read_command, resolve_variables};

/// Machine-readable result of `classify --json`. Carries no private values.
#[derive(Debug, Serialize)]
pub struct ClassifyReport<'a> {
    pub method: &'a str,
    pub url: String,
    pub public: &'a ParamSet,
    pub private: MaskedParams,
    pub private_param_keys: PrivateParamKeys,
    pub missing_variables: Vec<String>,
}

impl<'a> ClassifyReport<'a> {
    pub fn new(prepared: &'a PreparedRequest, vars: &Variables) -> Self {
        Self {
            method: &prepared.descriptor.method,
            url: display_url(&prepared.original),
            public: &prepared.partition.public,
            private: mask_private(&prepared.partition.private),
            private_param_keys: PrivateParamKeys::from_params(&prepared.partition.private),
            missing_variables: prepared.missing_variables(vars),
        }
    }
}

/// The URL as written in the original command line, variables unresolved.
///
/// A URL that only appears after substitution is shown as the mask, since
/// it came entirely from variable values.
fn display_url(original: &str) -> String {
    parse(original, &Variables::new())
        .map(|d| d.url)
        .unwrap_or_else(|_| MASK.to_string())
}

pub fn run_scan(cmd: &ScanCommand) -> Result<()> {
    let source = read_command(&cmd.input)?;
    let names = scan(&source.command);
    debug!("scan found {} variable(s).", names.len());

    let mut stdout = io::stdout().lock();
    if cmd.json {
        serde_json::to_writer(&mut stdout, &names).context("Failed to write JSON output")?;
        writeln!(stdout)?;
    } else {
        for name in names {
            writeln!(stdout, "{}", name)?;
        }
    }
    Ok(())
}

pub fn run_parse(cmd: &ParseCommand) -> Result<()> {
    let source = read_command(&cmd.input)?;
    let vars = resolve_variables(&source.command, source.profile_variables, &cmd.variables)?;
    let descriptor = parse(&source.command, &vars).context("Failed to parse curl command")?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &descriptor).context("Failed to write JSON output")?;
    writeln!(stdout)?;
    Ok(())
}

pub fn run_classify(cmd: &ClassifyCommand, theme_map: &ThemeMap) -> Result<()> {
    info!("Starting classify operation.");
    let source = read_command(&cmd.input)?;
    let vars = resolve_variables(&source.command, source.profile_variables, &cmd.variables)?;
    let prepared = prepare_request(&source.command, &vars).context("Failed to parse curl command")?;

    let report = ClassifyReport::new(&prepared, &vars);
    if !report.missing_variables.is_empty() {
        let missing = report.missing_variables.join(", ");
        if cmd.strict {
            bail!("unresolved variable(s): {}", missing);
        }
        warn_msg(format!("No value for variable(s): {}; they are left unsubstituted.", missing), theme_map);
    }

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut writer = stdout.lock();

    if cmd.json {
        serde_json::to_writer_pretty(&mut writer, &report).context("Failed to write JSON output")?;
        writeln!(writer)?;
    } else {
        writeln!(writer, "Request: {} {}", report.method, report.url)?;
        if report.public.is_empty() && report.private == MaskedParams::default() {
            info_msg("The request has no headers and no body to classify.", theme_map);
        } else {
            print_header(&mut writer, "Parameters", theme_map, supports_color)?;
            let table = build_partition_table(report.public, &report.private, supports_color);
            writeln!(writer, "{}", table)?;
            writeln!(writer, "Private values are masked with '{}'.", MASK)?;
        }
    }

    info!("Classify operation completed.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_never_contains_private_values() {
        let original = "curl -X POST https://api.example.com/x -H 'Authorization: Bearer $TOKEN' -d '{\"pin\":\"$PIN\"}'";
        let vars: Variables = [("TOKEN".to_string(), "tok-123".to_string())].into();
        let prepared = prepare_request(original, &vars).unwrap();
        let report = ClassifyReport::new(&prepared, &vars);

        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("tok-123"));
        assert_eq!(report.missing_variables, vec!["PIN".to_string()]);
        assert_eq!(report.private_param_keys.headers, vec!["Authorization".to_string()]);
        assert_eq!(report.private_param_keys.body, vec!["pin".to_string()]);
    }

    #[test]
    fn url_built_from_variables_is_masked() {
        assert_eq!(display_url("curl $ENDPOINT -H 'A: b'"), MASK);
        assert_eq!(display_url("curl https://$HOST/x"), "https://$HOST/x");
    }
}
