fn main() {
    use clap::Parser;
    use std::error::Error;
    let args = postscrape::cli::Args::parse();
    postscrape::cli::init_logging(&args);
    if let Err(e) = postscrape::cli::run(&args) {
        eprintln!("{}", e);
        if args.verbose {
            let mut source = e.source();
            while let Some(s) = source {
                eprintln!("  cause: {}", s);
                source = s.source();
            }
        }
        std::process::exit(1);
    }
}
