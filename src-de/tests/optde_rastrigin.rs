use boxopt_de::{DEConfigBuilder, Strategy, differential_evolution};
use boxopt_testfunctions::{create_bounds, rastrigin};

#[test]
fn test_de_rastrigin_2d() {
    let bounds = create_bounds(2, -5.12, 5.12);
    let config = DEConfigBuilder::new()
        .seed(40)
        .maxiter(1000)
        .popsize(30)
        .strategy(Strategy::Rand1Bin)
        .recombination(0.9)
        .tol(1e-10)
        .build()
        .unwrap();
    let report = differential_evolution(&rastrigin, &bounds, config).unwrap();
    assert!(report.fun < 1e-2, "f={}", report.fun);
}

#[test]
fn test_de_rastrigin_islands() {
    // several islands keep diversity on the multimodal landscape
    let bounds = create_bounds(3, -5.12, 5.12);
    let config = DEConfigBuilder::new()
        .seed(41)
        .maxiter(1500)
        .popsize(15)
        .islands(4)
        .migration_interval(20)
        .strategy(Strategy::Rand1Bin)
        .recombination(0.9)
        .tol(1e-10)
        .build()
        .unwrap();
    let report = differential_evolution(&rastrigin, &bounds, config).unwrap();
    assert!(report.fun < 1.0, "f={}", report.fun);
}
