use fxplot_rs::ExpressionCompiler;

fn main() {
    pretty_env_logger::init();

    let inputs = ["x^2", "X + 3.5", "x ^-3", "1/x", "2^y", "x*(x)"];

    for input in inputs {
        let reader = ExpressionCompiler::new(input);
        match reader.function() {
            Some(f) => println!("{:<8} -> {:<16} f(2) = {}", input, reader.title(), f(2.0)),
            None => println!("{:<8} -> {:?}", input, reader.title()),
        }
    }
}
