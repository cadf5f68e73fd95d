use clap::Parser;
use simple_logger::SimpleLogger;
use vmod_install::args::Args;
use vmod_install::{ExitStatus, LinuxSystem};

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help / --version 正常退出，其余用法错误一律返回1
            let status = if e.use_stderr() {
                ExitStatus::Failure
            } else {
                ExitStatus::Success
            };
            std::process::exit(status as i32);
        }
    };

    if let Err(e) = SimpleLogger::new().without_timestamps().init() {
        eprintln!("cannot initialize logger: {}", e);
    }
    log::set_max_level(args.log_level());

    if let Err(e) = vmod_install::run(&args.as_config(), &mut LinuxSystem) {
        exit(e.to_string());
    }
}

/// 错误信息直接写到stderr，不受日志级别影响
fn exit(msg: String) {
    eprintln!("{}", msg);
    std::process::exit(ExitStatus::Failure as i32);
}
