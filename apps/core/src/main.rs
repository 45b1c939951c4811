use clap::Parser;

fn main() {
    let options = keyfind_core::runtime::CliOptions::parse();

    if let Err(error) = keyfind_core::runtime::run_with_options(options) {
        eprintln!("[keyfind-core] {error}");
        std::process::exit(1);
    }
}
