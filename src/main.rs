use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    skillsync_cli::run()
}
