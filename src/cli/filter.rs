use medium_wave::filter::{filter_graph, pretty};

pub fn handle_filter(pretty_print: bool) {
    if pretty_print {
        println!("{}", pretty(filter_graph()));
    } else {
        println!("{}", filter_graph());
    }
}
