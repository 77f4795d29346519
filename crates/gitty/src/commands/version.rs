//! Version command

use crate::cli::VersionArgs;
use anyhow::Result;
use gitty_update::VersionInfo;

fn build_info() -> VersionInfo {
    VersionInfo::current(option_env!("GIT_SHA"), option_env!("BUILD_DATE"))
}

pub fn run(args: VersionArgs) -> Result<()> {
    let info = build_info();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Gitty version: {}", info.version);
        if let Some(date) = &info.build_date {
            println!("Build date:    {}", date);
        }
        if let Some(commit) = &info.commit {
            println!("Git commit:    {}", commit);
        }
        println!("Platform:      {}", info.platform);
    }

    Ok(())
}
