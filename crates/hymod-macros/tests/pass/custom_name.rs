use hymod_macros::Fluxes;

#[derive(Fluxes)]
#[fluxes(timeseries_name = "RoutedSeries")]
pub struct Routed {
    pub quick_flow: f64,
    pub slow_flow: f64,
}

fn main() {
    let mut ts = RoutedSeries::with_capacity(1);
    ts.push(&Routed {
        quick_flow: 0.2,
        slow_flow: 0.1,
    });
    assert_eq!(ts.len(), 1);
    assert_eq!(ts.slow_flow, vec![0.1]);
}
