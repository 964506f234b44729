use clap::Args;

use super::{open_session, CliResult};

#[derive(Args)]
pub struct ReportArgs {
    /// Only report this semester
    #[arg(long)]
    semester: Option<usize>,
}

pub fn run(args: ReportArgs) -> CliResult {
    let (session, _config) = open_session()?;

    match args.semester {
        Some(index) => {
            let report = session.semester_report(index)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        None => println!("{}", serde_json::to_string_pretty(&session.report())?),
    }
    Ok(())
}
