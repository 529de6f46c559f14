//! `profiles`: show the active and default profiles.

use anyhow::Result;
use confstack::Environment;

use crate::formatters::{Formatter, ProfilesOutput};

pub fn collect(environment: &Environment) -> ProfilesOutput {
    ProfilesOutput {
        active: environment.active_profiles(),
        default: environment.default_profiles(),
    }
}

pub fn run(environment: &Environment, formatter: &dyn Formatter) -> Result<()> {
    let output = formatter.format_profiles(&collect(environment))?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_profiles() {
        let mut environment =
            Environment::new().with_command_line_args(["--app.profiles.default=local"]);
        assert_eq!(
            collect(&environment),
            ProfilesOutput {
                active: vec![],
                default: vec!["local".to_string()],
            }
        );

        environment.set_active_profiles(["prod"]);
        assert_eq!(collect(&environment).active, vec!["prod"]);
    }
}
