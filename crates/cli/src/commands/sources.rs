//! `sources`: list property sources in precedence order.

use anyhow::Result;
use confstack::Environment;

use crate::formatters::{Formatter, SourceSummary};

pub fn collect(environment: &Environment) -> Vec<SourceSummary> {
    environment
        .property_sources()
        .iter()
        .map(|source| SourceSummary {
            name: source.name().to_string(),
            kind: source.kind(),
            properties: source.properties().len(),
        })
        .collect()
}

pub fn run(environment: &Environment, formatter: &dyn Formatter) -> Result<()> {
    let output = formatter.format_sources(&collect(environment))?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use confstack::{PropertySource, SourceKind};

    #[test]
    fn test_collect_keeps_order() {
        let environment = Environment::new()
            .with_command_line_args(["--a=1", "--b=2"])
            .with_system_environment([("HOME", "/root")])
            .with_property_source(PropertySource::new("extra"));
        let summaries = collect(&environment);
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["commandLineArgs", "systemEnvironment", "extra"]);
        assert_eq!(summaries[0].properties, 2);
        assert_eq!(summaries[1].kind, SourceKind::SystemEnvironment);
    }
}
