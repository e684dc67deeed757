use prometheus::register_int_counter_vec;
use prometheus::IntCounterVec;
use prometheus::{Encoder, TextEncoder};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref REQUEST_CNTR: IntCounterVec = register_int_counter_vec!(
        "fakeso_requests_total",
        "Number of requests sent to the forum server",
        &["endpoint", "outcome"]
    )
    .unwrap();
}

pub fn init_tracing() {
    let mut fmt_layer = fmt::layer().with_writer(std::io::stderr);
    if std::env::var("INCLUDE_SPAN_EVENTS").is_ok_and(|value| value.eq_ignore_ascii_case("true")) {
        fmt_layer = fmt_layer.with_span_events(FmtSpan::ENTER | FmtSpan::EXIT);
    }
    let filter_layer = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

pub fn render_metrics() -> anyhow::Result<String> {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder.encode(&metrics, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn counted_requests_show_up_in_rendered_metrics() {
        REQUEST_CNTR
            .with_label_values(&["user/test", "ok"])
            .inc();

        let text = render_metrics().unwrap();

        assert!(text.contains("fakeso_requests_total"));
        assert!(text.contains("endpoint=\"user/test\""));
    }
}
