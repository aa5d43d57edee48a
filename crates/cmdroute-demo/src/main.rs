//! `repoctl`: a toy repository tool showing cmdroute end to end.
//!
//! ```text
//! repoctl [--verbose] <org> <repo> <command> [flags] [args]
//! repoctl acme site deploy --force prod
//! repoctl help deploy
//! ```

use clap::{Arg, ArgAction, Args, FromArgMatches};
use cmdroute::{CommandContext, FnHandler, Handler, HandlerResult, PreArgs, Registry};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Args, Debug)]
struct DeployFlags {
    /// Deploy even when checks fail
    #[arg(long)]
    force: bool,

    /// Target region
    #[arg(long, default_value = "eu-west-1")]
    region: String,
}

struct Deploy;

impl Handler for Deploy {
    fn flags(&self, flags: clap::Command) -> clap::Command {
        DeployFlags::augment_args(flags)
    }

    fn run(&mut self, ctx: &CommandContext<'_>) -> HandlerResult {
        let flags = DeployFlags::from_arg_matches(ctx.matches)?;
        let env = ctx
            .args
            .first()
            .ok_or_else(|| anyhow::anyhow!("missing environment"))?;
        info!(env = %env, region = %flags.region, "deploying");
        println!("{} -> {} ({})", slug(ctx.pre_args), env, flags.region);
        Ok(())
    }
}

/// `org/repo`, or `-` when the pre-arguments were skipped.
fn slug(pre_args: &PreArgs) -> String {
    match (pre_args.get("org"), pre_args.get("repo")) {
        (Some(org), Some(repo)) => format!("{}/{}", org, repo),
        _ => "-".to_string(),
    }
}

fn push_summary(branch: &str, paths: &[String]) -> String {
    if paths.is_empty() {
        format!("pushing {}", branch)
    } else {
        format!("pushing {} ({})", branch, paths.join(", "))
    }
}

fn build_registry() -> anyhow::Result<Registry> {
    let mut registry = Registry::new("repoctl");
    registry.global_arg(
        Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("Log debug output to stderr")
            .action(ArgAction::SetTrue),
    );
    registry.pre_arg("org", "Organization that owns the repository");
    registry.pre_arg("repo", "Repository name");

    registry.command(
        "status",
        "Show repository status",
        FnHandler::new(|ctx: &CommandContext<'_>| {
            println!("{}: clean", slug(ctx.pre_args));
        }),
    );

    registry
        .command("deploy", "Deploy to an environment", Deploy)
        .required_flag("force")
        .arguments(["env"])?;

    registry
        .command(
            "push",
            "Push a branch",
            FnHandler::new(|ctx: &CommandContext<'_>| -> HandlerResult {
                let (branch, paths) = ctx
                    .args
                    .split_first()
                    .ok_or_else(|| anyhow::anyhow!("missing branch"))?;
                println!("{}: {}", slug(ctx.pre_args), push_summary(branch, paths));
                Ok(())
            }),
        )
        .arguments(["branch", "..."])?;

    registry.enable_help_command().enable_help_bypass();
    Ok(registry)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let mut registry = build_registry()?;
    let resolution = registry.resolve_or_exit();

    init_logging(resolution.globals().get_flag("verbose"));
    debug!(command = ?resolution.command(), "resolved");

    registry.dispatch_or_exit(&resolution)
}
