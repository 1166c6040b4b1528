use hquant_rolling::bars::{Bar, BarSeries, Field};
use hquant_rolling::config::RollingConfig;
use hquant_rolling::indicator::{FastSma, RollingSum};

// RUST_LOG=trace cargo run --example basic  (shows resync / jump events)

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut bars = BarSeries::new(1024);
    for i in 0..200 {
        let close = 100.0 + (i as f64 * 0.01);
        bars.push(Bar::new(i, close, close, close, close, 1000.0));
    }

    let cfg = RollingConfig::from_toml_str(
        r#"
        window_size = 20
        resync_every = 50
        "#,
    )?;

    let mut sma = FastSma::with_config(bars.field(Field::Close), &cfg);
    let mut last = 0.0;
    for i in 0..bars.next_index() {
        last = sma.evaluate(i)?;
    }
    println!("sma20_last={last}");
    log::debug!("sma state:\n{}", toml::to_string(sma.state())?);

    // Seek back and forth on volume.
    let mut vol = RollingSum::with_config(bars.field(Field::Volume), &cfg);
    println!("vol20@199={}", vol.evaluate(199)?);
    println!("vol20@10={}", vol.evaluate(10)?);
    println!("vol20@12={}", vol.evaluate(12)?);

    Ok(())
}
