use std::error::Error;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use xuanji_rs::{
    BaziChart, BirthInput, ChartConfig, Gender, LeapMonthPolicy, LunarInfo, XuanjiError,
    YongshenResult, ZiweiChart,
};

#[derive(Parser)]
#[command(name = "xuanji", about = "Zi Wei Dou Shu and BaZi chart CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solar/lunar conversion and year pillar
    Lunar {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Zi Wei Dou Shu chart
    Ziwei {
        #[command(flatten)]
        birth: BirthArgs,
        #[command(flatten)]
        chart: ChartArgs,
        /// Show the overlay of the k-th decade (0-based)
        #[arg(long)]
        decade: Option<usize>,
        /// Show the yearly overlay of a Gregorian year
        #[arg(long)]
        year: Option<i32>,
    },
    /// BaZi four pillars, ten gods and major periods
    Bazi {
        #[command(flatten)]
        birth: BirthArgs,
        #[command(flatten)]
        chart: ChartArgs,
        /// Nominal age used to name the current major period
        #[arg(long)]
        age: Option<u32>,
    },
    /// Yongshen analysis of the BaZi chart
    Yongshen {
        #[command(flatten)]
        birth: BirthArgs,
        #[command(flatten)]
        chart: ChartArgs,
        /// Append the mermaid flowchart
        #[arg(long)]
        mermaid: bool,
    },
}

#[derive(Args)]
struct BirthArgs {
    /// Birth date (YYYY-MM-DD), lunar with --lunar
    date: String,
    /// Birth time (HH:MM)
    time: String,
    /// male | female
    #[arg(long, short)]
    gender: Gender,
    /// Date is a lunar date
    #[arg(long)]
    lunar: bool,
    /// Lunar month is the intercalary one
    #[arg(long, requires = "lunar")]
    leap: bool,
    /// UTC offset such as +08:00 or UTC-5 (default Beijing)
    #[arg(long)]
    tz: Option<String>,
}

#[derive(Args)]
struct ChartArgs {
    /// How a leap month is placed on the Zi Wei chart
    #[arg(long, value_enum, default_value_t = LeapPolicyArg::Same)]
    leap_policy: LeapPolicyArg,
    /// Keep 23:00-23:59 on the current day for the BaZi day pillar
    #[arg(long)]
    no_late_zi: bool,
    /// Number of major periods
    #[arg(long, default_value = "8")]
    periods: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum LeapPolicyArg {
    Same,
    Next,
    Split,
}

impl From<LeapPolicyArg> for LeapMonthPolicy {
    fn from(arg: LeapPolicyArg) -> Self {
        match arg {
            LeapPolicyArg::Same => Self::SameMonth,
            LeapPolicyArg::Next => Self::NextMonth,
            LeapPolicyArg::Split => Self::SplitAtFifteenth,
        }
    }
}

impl ChartArgs {
    fn config(&self) -> ChartConfig {
        ChartConfig {
            leap_month_policy: self.leap_policy.into(),
            late_zi_next_day: !self.no_late_zi,
            major_period_count: self.periods,
        }
    }
}

fn parse_fields<const N: usize>(s: &str, sep: char, what: &str) -> Result<[u32; N], XuanjiError> {
    let bad = || XuanjiError::InvalidInput(format!("{what} {s}"));
    let parts: Vec<u32> = s
        .split(sep)
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|_| bad())?;
    parts.try_into().map_err(|_| bad())
}

impl BirthArgs {
    fn input(&self) -> Result<BirthInput, XuanjiError> {
        let [year, month, day] = parse_fields::<3>(&self.date, '-', "date")?;
        let [hour, minute] = parse_fields::<2>(&self.time, ':', "time")?;
        let year = i32::try_from(year).map_err(|_| XuanjiError::InvalidInput(format!("year {year}")))?;
        let mut input = if self.lunar {
            BirthInput::lunar(year, month, day, self.leap, hour, minute, self.gender)
        } else {
            BirthInput::solar(year, month, day, hour, minute, self.gender)
        };
        if let Some(tz) = &self.tz {
            input = input.with_timezone(tz.clone());
        }
        Ok(input)
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

fn print_lunar(info: &LunarInfo) {
    println!("北京时间: {}", info.beijing);
    println!("农历: {}", info.text);
    println!("生肖: {}", info.animal);
    println!("时辰: {}时", info.hour_branch.name());
    match info.leap_month {
        Some(m) => println!("闰月: 闰{m}月"),
        None => println!("闰月: 无"),
    }
}

fn print_ziwei(chart: &ZiweiChart) {
    println!("{} {}命", chart.lunar_date, chart.gender.name_zh());
    println!(
        "命宫: {}  身宫: {}  {}",
        chart.life_branch.name(),
        chart.body_branch.name(),
        chart.bureau.name()
    );
    println!("命主: {}  身主: {}", chart.ming_zhu.name(), chart.shen_zhu.name());
    let sihua: Vec<String> = chart.sihua_info.iter().map(ToString::to_string).collect();
    println!("四化: {}", sihua.join("  "));
    println!();

    for p in chart.decade_palaces() {
        let mut flags = String::new();
        if p.is_shen_gong {
            flags.push_str("[身]");
        }
        if p.is_lai_yin {
            flags.push_str("[来因]");
        }
        let stars: Vec<String> = p
            .stars
            .iter()
            .map(|s| {
                let mut text = format!("{}({})", s.name.name(), s.brightness.name());
                if let Some(kind) = s.sihua {
                    text.push_str(kind.name());
                }
                for tag in &s.palace_hua {
                    text.push_str(&format!(" {tag}"));
                }
                text
            })
            .collect();
        println!(
            "{}{} {:<4}{} {:>7}  {}",
            p.heavenly_stem.name(),
            p.branch.name(),
            p.name.name(),
            flags,
            p.decade.to_string(),
            stars.join(" ")
        );
    }

    for w in &chart.warnings {
        println!("警告: {w}");
    }
}

fn print_labels(title: &str, labels: &[&str; 12]) {
    let cells: Vec<String> = xuanji_rs::ALL_BRANCHES
        .iter()
        .zip(labels)
        .map(|(b, l)| format!("{}:{l}", b.name()))
        .collect();
    println!("{title}: {}", cells.join(" "));
}

fn print_bazi(chart: &BaziChart, age: Option<u32>) {
    let p = &chart.pillars;
    println!(
        "四柱: {} {} {} {}",
        p.year.ganzhi, p.month.ganzhi, p.day.ganzhi, p.hour.ganzhi
    );
    println!(
        "纳音: {} {} {} {}",
        chart.na_yin.year.name(),
        chart.na_yin.month.name(),
        chart.na_yin.day.name(),
        chart.na_yin.hour.name()
    );
    let counts: Vec<String> = chart
        .element_count
        .iter()
        .map(|(e, n)| format!("{}{n}", e.name()))
        .collect();
    println!("五行: {}", counts.join(" "));
    println!("十神: {}", chart.ten_gods.summary.distribution);
    println!("{}", chart.na_yin.strength.description);
    println!("旺衰: {}", chart.strength.summary);
    println!("神煞: {}", chart.shensha.labels().join(" "));
    println!();

    let direction = if chart.major_periods.forward { "顺行" } else { "逆行" };
    println!("大运 ({direction}, {}岁起运):", chart.major_periods.start_age);
    for mp in &chart.major_periods.periods {
        let stars: Vec<&str> = mp.shensha.iter().map(|s| s.name()).collect();
        println!(
            "  {}-{} {} {} {} {}",
            mp.start_age,
            mp.end_age,
            mp.ganzhi,
            mp.ten_god.name(),
            mp.na_yin.name(),
            stars.join(" ")
        );
    }
    println!();
    println!("{}", chart.summary(age));
}

fn print_yongshen(result: &YongshenResult, mermaid: bool) {
    for line in &result.stream_lines {
        println!("{line}");
    }
    println!("{}", result.summary_line());
    if mermaid {
        println!();
        println!("{}", result.mermaid);
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------

fn init_logging(verbose: bool) {
    let default = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Lunar { birth } => {
            let info = xuanji_rs::lunar(&birth.input()?)?;
            if cli.json {
                print_json(&info)?;
            } else {
                print_lunar(&info);
            }
        }

        Commands::Ziwei {
            birth,
            chart,
            decade,
            year,
        } => {
            let config = chart.config();
            log::debug!("ziwei with {config:?}");
            let c = xuanji_rs::ziwei(&birth.input()?, &config)?;
            let decade = decade.map(|k| c.decade_overlay(k)).transpose()?;
            let yearly = year.map(|y| c.yearly_overlay(y));
            if cli.json {
                print_json(&serde_json::json!({
                    "chart": c,
                    "decade_overlay": decade,
                    "yearly_overlay": yearly,
                }))?;
            } else {
                print_ziwei(&c);
                if let Some(d) = &decade {
                    println!();
                    print_labels(&format!("大限 {}", d.range), &d.labels);
                }
                if let Some(y) = &yearly {
                    println!();
                    print_labels(&format!("流年 {} {}", y.year, y.ganzhi), &y.labels);
                }
            }
        }

        Commands::Bazi { birth, chart, age } => {
            let config = chart.config();
            log::debug!("bazi with {config:?}");
            let c = xuanji_rs::bazi(&birth.input()?, &config)?;
            if cli.json {
                print_json(&c)?;
            } else {
                print_bazi(&c, age);
            }
        }

        Commands::Yongshen {
            birth,
            chart,
            mermaid,
        } => {
            let result = xuanji_rs::yongshen(&birth.input()?, &chart.config())?;
            if cli.json {
                print_json(&result)?;
            } else {
                print_yongshen(&result, mermaid);
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
