use gh_workflow::*;

#[test]
fn main() {
    let test_job = Job::new("Test")
        .name("Test")
        .runs_on("ubuntu-latest")
        .permissions(Permissions::default().contents(Level::Read))
        .add_step(Step::new("Checkout Code").uses("actions", "checkout", "v4"))
        .add_step(
            Step::new("Setup Rust Toolchain")
                .uses("actions-rust-lang", "setup-rust-toolchain", "v1")
                .with(
                    Input::default()
                        .add("toolchain", "stable")
                        .add("cache", "true"),
                ),
        )
        .add_step(Step::new("Cargo Test").run("cargo test --all-features"));

    let lint_job = Job::new("Lint")
        .name("Lint")
        .runs_on("ubuntu-latest")
        .permissions(Permissions::default().contents(Level::Read))
        .add_step(Step::new("Checkout Code").uses("actions", "checkout", "v4"))
        .add_step(
            Step::new("Setup Rust Toolchain")
                .uses("actions-rust-lang", "setup-rust-toolchain", "v1")
                .with(
                    Input::default()
                        .add("toolchain", "stable")
                        .add("components", "clippy, rustfmt")
                        .add("cache", "true"),
                ),
        )
        .add_step(Step::new("Cargo Fmt").run("cargo fmt --all --check"))
        .add_step(Step::new("Cargo Clippy").run("cargo clippy --all-targets -- -D warnings"));

    // Smoke-run the release binary and hit the health endpoint.
    let smoke_job = Job::new("Smoke")
        .name("Smoke")
        .runs_on("ubuntu-latest")
        .needs(vec!["test".to_string()])
        .permissions(Permissions::default().contents(Level::Read))
        .env(
            Env::default()
                .add("PORT", "8000")
                .add("ENVIRONMENT", "ci")
                .add("BUILD_NUMBER", "${{ github.run_number }}"),
        )
        .add_step(Step::new("Checkout Code").uses("actions", "checkout", "v4"))
        .add_step(
            Step::new("Setup Rust Toolchain")
                .uses("actions-rust-lang", "setup-rust-toolchain", "v1")
                .with(
                    Input::default()
                        .add("toolchain", "stable")
                        .add("cache", "true"),
                ),
        )
        .add_step(Step::new("Build Release").run("cargo build --release"))
        .add_step(Step::new("Start Server").run(
            "./target/release/pipeline-demo-api &\nsleep 2",
        ))
        .add_step(Step::new("Check Health").run(
            "curl --fail http://127.0.0.1:8000/health\ncurl --fail http://127.0.0.1:8000/info",
        ));

    let workflow = Workflow::new("ci")
        .name("ci")
        .env(Env::from(("RUSTFLAGS", "-Dwarnings")))
        .on(Event::default()
            .pull_request(
                PullRequest::default()
                    .add_branch("main")
                    .add_type(PullRequestType::Opened)
                    .add_type(PullRequestType::Synchronize)
                    .add_type(PullRequestType::Reopened),
            )
            .push(Push::default().add_branch("main")))
        .add_job("test", test_job)
        .add_job("lint", lint_job)
        .add_job("smoke", smoke_job);

    workflow.generate().unwrap();
}
