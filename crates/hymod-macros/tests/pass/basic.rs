use hymod_macros::Fluxes;

#[derive(Fluxes)]
pub struct Fluxes {
    pub excess: f64,
    pub streamflow: f64,
}

fn main() {
    let mut ts = FluxesTimeseries::with_capacity(2);
    assert!(ts.is_empty());
    ts.push(&Fluxes {
        excess: 1.0,
        streamflow: 0.5,
    });
    assert_eq!(ts.len(), 1);
    assert_eq!(ts.excess, vec![1.0]);
    assert_eq!(Fluxes::field_names(), &["excess", "streamflow"]);
}
