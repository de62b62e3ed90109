use fxplot_rs::{ExpressionCache, PlotConfig, PlotRange};

fn main() {
    pretty_env_logger::init();

    let config = PlotConfig::new("x^3 - 2*x + 1")
        .with_range(PlotRange::new(-2.0, 2.0))
        .with_intervals(20);

    let plot = config.render();
    println!("{}", plot.title);
    if let Some(samples) = plot.samples {
        for sample in samples.defined() {
            println!("{:>6.2} {:>10.4}", sample.x, sample.y);
        }
    }

    let mut cache = ExpressionCache::default();
    for input in ["1/x", "1 / X", "x*(x)"] {
        match cache.get_or_compile(input) {
            Ok(compiled) => println!("{} -> {}", input, compiled.display_string()),
            Err(e) => println!("{} -> {}", input, e),
        }
    }
    println!("cached outcomes: {}", cache.len());
}
