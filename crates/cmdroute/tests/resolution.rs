use clap::{Arg, ArgAction};
use cmdroute::{ArityError, CommandContext, FnHandler, Registry, ResolveKind};

fn noop() -> FnHandler<impl FnMut(&CommandContext<'_>), ()> {
    FnHandler::new(|_ctx: &CommandContext<'_>| {})
}

fn force_flag() -> FnHandler<impl FnMut(&CommandContext<'_>), ()> {
    noop().with_flags(|cmd| cmd.arg(Arg::new("force").long("force").action(ArgAction::SetTrue)))
}

#[test]
fn deploy_with_required_flag_and_env() {
    let mut registry = Registry::new("repoctl");
    registry
        .command("deploy", "Deploy", force_flag())
        .required_flag("force")
        .arguments(["env"])
        .unwrap();

    let resolution = registry.resolve(["deploy", "--force", "prod"]).unwrap();
    let matched = resolution.matched().unwrap();
    assert_eq!(matched.name(), "deploy");
    assert!(matched.matches().get_flag("force"));
    assert_eq!(matched.args(), ["prod"]);
}

#[test]
fn deploy_without_required_flag_is_invalid() {
    let mut registry = Registry::new("repoctl");
    registry
        .command("deploy", "Deploy", force_flag())
        .required_flag("force")
        .arguments(["env"])
        .unwrap();

    let err = registry.resolve(["deploy", "prod"]).unwrap_err();
    assert_eq!(err.kind(), ResolveKind::InvalidCommand);
    assert_eq!(err.command(), Some("deploy"));
    assert_eq!(err.to_string(), "deploy: missing required flags: force");
}

#[test]
fn pre_args_are_consumed_in_order() {
    let mut registry = Registry::new("repoctl");
    let org = registry.pre_arg("org", "Organization");
    let repo = registry.pre_arg("repo", "Repository");
    registry.command("status", "Show status", noop());

    let resolution = registry.resolve(["acme", "myrepo", "status"]).unwrap();
    assert_eq!(resolution.pre_args().value(&org), Some("acme"));
    assert_eq!(resolution.pre_args().value(&repo), Some("myrepo"));
    assert_eq!(resolution.command(), Some("status"));
    assert!(resolution.args().is_empty());
}

#[test]
fn unknown_command_is_invalid() {
    let mut registry = Registry::new("repoctl");
    registry.command("status", "Show status", noop());

    let err = registry.resolve(["unknown-cmd"]).unwrap_err();
    assert_eq!(err.kind(), ResolveKind::InvalidCommand);
    assert!(err.command().is_none());
}

#[test]
fn missing_pre_arg() {
    let mut registry = Registry::new("repoctl");
    registry.pre_arg("org", "Organization");
    registry.command("status", "Show status", noop());

    let err = registry.resolve(Vec::<String>::new()).unwrap_err();
    assert_eq!(err.kind(), ResolveKind::NoPreArg);
    assert_eq!(err.to_string(), "expected 1 argument(s) before command");
}

#[test]
fn missing_command_after_pre_args() {
    let mut registry = Registry::new("repoctl");
    registry.pre_arg("org", "Organization");
    registry.command("status", "Show status", noop());

    let err = registry.resolve(["acme"]).unwrap_err();
    assert_eq!(err.kind(), ResolveKind::NoCommand);
    assert_eq!(err.pre_args().get("org"), Some("acme"));
}

#[test]
fn variadic_takes_the_rest() {
    let mut registry = Registry::new("repoctl");
    registry
        .command("push", "Push", noop())
        .arguments(["branch", "..."])
        .unwrap();

    let resolution = registry.resolve(["push", "main", "a", "b", "c"]).unwrap();
    assert_eq!(resolution.args(), ["main", "a", "b", "c"]);

    let err = registry.resolve(["push"]).unwrap_err();
    assert_eq!(err.arity(), Some(ArityError::TooFew));
}

#[test]
fn optional_slot_bounds() {
    let mut registry = Registry::new("repoctl");
    registry
        .command("tag", "Tag", noop())
        .arguments(["name", "[commit]"])
        .unwrap();

    assert!(registry.resolve(["tag", "v1"]).is_ok());
    assert!(registry.resolve(["tag", "v1", "abc123"]).is_ok());

    let err = registry.resolve(["tag", "v1", "abc123", "extra"]).unwrap_err();
    assert_eq!(err.kind(), ResolveKind::ArgError);
    assert_eq!(err.arity(), Some(ArityError::TooMany));
    assert_eq!(err.to_string(), "tag: too many arguments");
}

#[test]
fn command_without_spec_accepts_anything() {
    let mut registry = Registry::new("repoctl");
    registry.command("exec", "Run anything", noop());

    let resolution = registry.resolve(["exec", "a", "-b", "--c"]).unwrap();
    assert_eq!(resolution.args(), ["a", "-b", "--c"]);
}

#[test]
fn empty_spec_rejects_arguments() {
    let mut registry = Registry::new("repoctl");
    registry
        .command("status", "Show status", noop())
        .arguments(Vec::<String>::new())
        .unwrap();

    assert!(registry.resolve(["status"]).is_ok());
    let err = registry.resolve(["status", "x"]).unwrap_err();
    assert_eq!(err.arity(), Some(ArityError::TooMany));
}

#[test]
fn help_bypass_with_registered_help() {
    let mut registry = Registry::new("repoctl");
    registry.enable_help_command().enable_help_bypass();
    let org = registry.pre_arg("org", "Organization");
    registry.command("status", "Show status", noop());

    let resolution = registry.resolve(["help"]).unwrap();
    assert!(resolution.help_bypassed());
    assert_eq!(resolution.pre_args().value(&org), None);
    assert_eq!(resolution.command(), Some("help"));
}

#[test]
fn help_bypass_without_help_command() {
    let mut registry = Registry::new("repoctl");
    registry.enable_help_bypass();
    registry.pre_arg("org", "Organization");
    registry.command("status", "Show status", noop());

    let err = registry.resolve(["help"]).unwrap_err();
    assert_eq!(err.kind(), ResolveKind::InvalidCommand);
    assert!(err.pre_args().is_empty());
}

#[test]
fn globals_survive_failures() {
    let mut registry = Registry::new("repoctl");
    registry.global_arg(Arg::new("verbose").long("verbose").action(ArgAction::SetTrue));
    registry.pre_arg("org", "Organization");
    registry.command("status", "Show status", noop());

    let err = registry.resolve(["--verbose", "acme", "nope"]).unwrap_err();
    assert_eq!(err.kind(), ResolveKind::InvalidCommand);
    assert!(err.globals().unwrap().get_flag("verbose"));
    assert_eq!(err.pre_args().get("org"), Some("acme"));
}

#[test]
fn flags_use_clap_syntax() {
    let mut registry = Registry::new("repoctl");
    registry.command(
        "deploy",
        "Deploy",
        noop().with_flags(|cmd| {
            cmd.arg(Arg::new("region").short('r').long("region"))
                .arg(Arg::new("dry-run").long("dry-run").action(ArgAction::SetTrue))
        }),
    );

    let resolution = registry
        .resolve(["deploy", "--region=eu", "--dry-run", "prod"])
        .unwrap();
    let matched = resolution.matched().unwrap();
    assert_eq!(
        matched.matches().get_one::<String>("region").map(String::as_str),
        Some("eu")
    );
    assert!(matched.matches().get_flag("dry-run"));

    let resolution = registry.resolve(["deploy", "-r", "us", "prod"]).unwrap();
    assert_eq!(
        resolution
            .matched()
            .unwrap()
            .matches()
            .get_one::<String>("region")
            .map(String::as_str),
        Some("us")
    );
}

#[test]
fn independent_registries_do_not_interfere() {
    let mut first = Registry::new("one");
    first.command("a", "", noop());
    let mut second = Registry::new("two");
    second.command("b", "", noop());

    assert!(first.resolve(["a"]).is_ok());
    assert!(first.resolve(["b"]).is_err());
    assert!(second.resolve(["b"]).is_ok());
    assert!(second.resolve(["a"]).is_err());
}

#[test]
fn missing_required_flag_keeps_parsed_command() {
    let mut registry = Registry::new("repoctl");
    registry
        .command(
            "deploy",
            "Deploy",
            noop().with_flags(|cmd| {
                cmd.arg(Arg::new("force").long("force").action(ArgAction::SetTrue))
                    .arg(Arg::new("region").long("region"))
            }),
        )
        .required_flag("force")
        .arguments(["env"])
        .unwrap();

    let err = registry
        .resolve(["deploy", "--region", "us", "prod"])
        .unwrap_err();
    assert_eq!(err.kind(), ResolveKind::InvalidCommand);

    let matched = err.matched().unwrap();
    assert_eq!(matched.name(), "deploy");
    assert_eq!(
        matched.matches().get_one::<String>("region").map(String::as_str),
        Some("us")
    );
    assert!(!matched.matches().get_flag("force"));
    assert_eq!(matched.args(), ["prod"]);
}

#[test]
fn arity_failure_keeps_parsed_command() {
    let mut registry = Registry::new("repoctl");
    registry
        .command("deploy", "Deploy", force_flag())
        .arguments(["env"])
        .unwrap();

    let err = registry
        .resolve(["deploy", "--force", "prod", "extra"])
        .unwrap_err();
    assert_eq!(err.kind(), ResolveKind::ArgError);

    let matched = err.matched().unwrap();
    assert!(matched.matches().get_flag("force"));
    assert_eq!(matched.args(), ["prod", "extra"]);
}

#[test]
fn earlier_failures_have_no_command_context() {
    let mut registry = Registry::new("repoctl");
    registry.pre_arg("org", "Organization");
    registry.command("deploy", "Deploy", force_flag());

    assert!(registry.resolve(Vec::<String>::new()).unwrap_err().matched().is_none());
    assert!(registry.resolve(["acme"]).unwrap_err().matched().is_none());
    assert!(registry.resolve(["acme", "nope"]).unwrap_err().matched().is_none());
    assert!(registry
        .resolve(["acme", "deploy", "--bogus"])
        .unwrap_err()
        .matched()
        .is_none());
}

#[test]
fn repeated_flags_keep_last_value() {
    let mut registry = Registry::new("repoctl");
    registry
        .command(
            "deploy",
            "Deploy",
            noop().with_flags(|cmd| {
                cmd.arg(Arg::new("force").long("force").action(ArgAction::SetTrue))
                    .arg(Arg::new("region").long("region"))
            }),
        )
        .required_flag("force")
        .arguments(["env"])
        .unwrap();

    let resolution = registry
        .resolve(["deploy", "--force", "--force", "--region", "a", "--region", "b", "prod"])
        .unwrap();
    let matched = resolution.matched().unwrap();
    assert!(matched.matches().get_flag("force"));
    assert_eq!(
        matched.matches().get_one::<String>("region").map(String::as_str),
        Some("b")
    );
    assert_eq!(matched.args(), ["prod"]);
}
