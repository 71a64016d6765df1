//! pqconvert - PARQUET TO JSONL CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use pqconvert::{
    cli::{Args, RunMode},
    config::DirLayout,
    converter::Progress,
    error::ConvertError,
    resolver::resolve,
    scan::{self, ConversionJob, FileOutcome},
    stats::{format_bytes, ScanSummary},
};

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose);

    let layout = args.layout();

    match args.mode() {
        RunMode::Bulk => run_bulk_mode(&args, &layout),
        RunMode::Single(input) => {
            if let Err(e) = run_single_mode(&args, &layout, &input) {
                eprintln!("\n{} {}", "❌ 변환 중 오류 발생:".bright_red(), e);
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

/// 로깅 초기화 (RUST_LOG 우선, 기본값 warn / verbose 시 info)
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// 헤더 출력
fn print_header(args: &Args) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        " 🚀 PARQUET TO JSONL CONVERTER".bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());

    if let Some(batch_size) = args.batch_size {
        println!("  {} 배치 크기: {}", "📦".bright_yellow(), batch_size);
    }

    if let Some(ref pattern) = args.pattern {
        println!("  {} 패턴 필터: {}", "🔍".bright_magenta(), pattern);
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 변환 없음)".yellow()
        );
    }
}

/// 단일 파일 변환
fn run_single_mode(args: &Args, layout: &DirLayout, input: &Path) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| resolve(input, layout));

    print_header(args);
    println!("  {} 입력 파일: {:?}", "📂".bright_cyan(), input);
    println!("  {} 출력 파일: {:?}", "📄".bright_green(), output);
    println!("{}", "═".repeat(50).bright_blue());

    if args.dry_run {
        return Ok(());
    }

    let job = ConversionJob::new(input, output, args.convert_options());
    let pb = create_progress_bar();

    let report = job.run_with_progress(|progress: Progress| {
        pb.set_length(progress.rows_total as u64);
        pb.set_position(progress.rows_done as u64);
    });

    match report {
        Ok(report) => {
            pb.finish_with_message("완료!");
            println!(
                "\n{} {} 개의 레코드 변환 완료 ({}): {:?}\n",
                "✅".bright_green(),
                report.records.to_string().bright_green(),
                format_bytes(report.bytes_written),
                job.dest
            );
            Ok(())
        }
        Err(e) => {
            pb.abandon();
            Err(e.into())
        }
    }
}

/// 입력 폴더 일괄 변환
fn run_bulk_mode(args: &Args, layout: &DirLayout) -> Result<()> {
    print_header(args);
    if args.output_ignored() {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "폴더 일괄 변환에서는 -o/--output 옵션이 무시됩니다".yellow()
        );
    }
    println!("  {} 입력 폴더: {:?}", "📂".bright_cyan(), layout.source_dir);
    println!("  {} 출력 폴더: {:?}", "📄".bright_green(), layout.dest_dir);
    println!("{}", "═".repeat(50).bright_blue());
    println!("\n{}", "📁 파일 검색 중...".bright_cyan());

    let options = args.scan_options();

    if args.dry_run {
        return match scan::plan(layout, &options) {
            Ok(jobs) if jobs.is_empty() => {
                println!("{}", "⚠️ 변환할 Parquet 파일이 없습니다.".yellow());
                Ok(())
            }
            Ok(jobs) => {
                print_dry_run(&jobs);
                Ok(())
            }
            Err(ConvertError::InputDirNotFound { path }) => {
                eprintln!(
                    "{} {:?}",
                    "⚠️ 입력 폴더가 존재하지 않습니다:".yellow(),
                    path
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        };
    }

    let summary =
        scan::convert_all_with(layout, &options, |outcome| print_outcome(outcome, args.verbose))?;

    if summary.total_files == 0 {
        println!("{}", "⚠️ 변환할 Parquet 파일이 없습니다.".yellow());
        return Ok(());
    }

    print_errors(&summary, args.verbose);
    summary.print_summary();

    Ok(())
}

/// 파일 하나의 변환 결과 출력
fn print_outcome(outcome: &FileOutcome, verbose: bool) {
    let name = outcome.job.source.file_name().unwrap_or_default();
    match &outcome.result {
        Ok(report) => {
            if verbose {
                println!(
                    "  {} {:?} -> {:?} ({} 레코드)",
                    "✓".green(),
                    name,
                    outcome.job.dest,
                    report.records
                );
            } else {
                println!("  {} {:?}", "✓".green(), name);
            }
        }
        Err(_) => println!("  {} {:?}", "✗".red(), name),
    }
}

/// 드라이런 출력
fn print_dry_run(jobs: &[ConversionJob]) {
    println!("\n{}", "📋 처리 예정 파일 목록:".bright_cyan());
    for (i, job) in jobs.iter().enumerate() {
        println!("  {}. {:?} -> {:?}", i + 1, job.source, job.dest);
    }
    println!(
        "\n{} 총 {} 개의 파일이 변환될 예정입니다.",
        "ℹ️".bright_blue(),
        jobs.len().to_string().bright_green()
    );
}

/// 진행률 바 생성 (전체 행 수는 첫 진행 보고 때 설정)
fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} 행 ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

/// 에러 목록 출력
fn print_errors(summary: &ScanSummary, verbose: bool) {
    if summary.error_count() == 0 {
        return;
    }

    println!("\n{}", "❌ 오류 발생 파일:".bright_red());
    for outcome in summary.failures() {
        println!(
            "  {} {:?}",
            "•".red(),
            outcome.job.source.file_name().unwrap_or_default()
        );
        if let (true, Err(e)) = (verbose, &outcome.result) {
            println!("    {}", e.to_string().dimmed());
        }
    }
}
