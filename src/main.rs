use anyhow::Result;
use clap::Parser;

use release_train::config;
use release_train::domain::WorkflowParameters;
use release_train::git::Git2Repository;
use release_train::release_tool::MavenReleaseTool;
use release_train::ui;
use release_train::workflow::ReleaseWorkflow;

#[derive(clap::Parser)]
#[command(
    name = "release-train",
    version,
    about = "Bump versions across a multi-module tree and drive the release plugin through a full release cycle"
)]
struct Args {
    #[arg(help = "Root directory of the source tree")]
    directory: String,

    #[arg(help = "Version string currently recorded in the tree")]
    current_version: String,

    #[arg(help = "Version to release")]
    release_version: String,

    #[arg(help = "Development version the tree advances to after the release")]
    next_dev_version: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,
}

fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                e.exit()
            }
            _ => {
                e.print()?;
                std::process::exit(1);
            }
        },
    };

    let params = WorkflowParameters::new(
        &args.directory,
        &args.current_version,
        &args.release_version,
        &args.next_dev_version,
    );
    if let Err(e) = params.validate() {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let repo = match Git2Repository::open(&params.root_dir) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let tool = MavenReleaseTool::new(
        &params.root_dir,
        config.release_tool.program.as_str(),
        config.release_tool.skip_tests,
    );

    let workflow = ReleaseWorkflow::new(&params, &config, &repo, &tool);
    let report = workflow.run();

    ui::display_report(&report);

    // Step failures surface in the log and report only; once the workflow
    // starts, the process exits 0.
    Ok(())
}
