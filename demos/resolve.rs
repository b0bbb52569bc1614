use std::collections::HashSet;

use varcode::VariantResolver;

const ROLES: &[(&str, &str)] = &[
    ("mcm", "MethCoaMuta"),
    ("epi", "MethCoaEpim"),
    ("mmcE", "MethMaloCoaEpim"),
    ("meaB", "MethCoaMutaChaperone"),
];

const DEFINITIONS: &str = "\
# auxiliary rules
core means mcm and epi
chaperoned means core and meaB
";

const VARIANTS: &str = "\
1.1 means chaperoned
1 means core
0.1 means 1 of {mcm, epi, mmcE}
";

fn main() {
    let built = VariantResolver::builder()
        .role("mcm", "MethCoaMuta")
        .role("epi", "MethCoaEpim")
        .definition("core", "mcm and epi")
        .variant("1", "core")
        .variant("active", "mcm or epi")
        .build()
        .expect("failed to build resolver");

    let partial: HashSet<&str> = ["MethCoaEpim"].into_iter().collect();
    println!("{built}");
    println!("Variant: {}", built.resolve(&partial));
    println!();

    let resolver = VariantResolver::from_texts(ROLES.iter().copied(), DEFINITIONS, VARIANTS)
        .expect("failed to load rules");
    println!("{resolver}");
    for (code, rule) in resolver.variants() {
        println!("  {code} means {rule}");
    }

    let genome: HashSet<&str> = ["MethCoaMuta", "MethMaloCoaEpim"].into_iter().collect();
    let report = resolver.resolve_detailed(&genome);

    println!();
    println!("{report}");
    println!("Tested in order: {:?}", report.tested());
    println!("Role tests: {}", report.observations());
    println!("Duration: {:?}", report.duration());
}
