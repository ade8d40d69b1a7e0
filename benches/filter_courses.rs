//! This bench test simulates the interactive filtering path: search and
//! department queries over a multi-thousand-course catalog, plus edge
//! derivation for the capped graph view.

#![allow(missing_docs)]

use std::collections::BTreeMap;

use coursegraph::{graph, Catalog, CourseInfo, GroupKind, RequirementNode, Session};
use criterion::{criterion_group, criterion_main, Criterion};

/// Generates a synthetic catalog: 40 departments of 120 numbered courses,
/// each course past the first requiring the previous one and an alternative.
fn preseed_catalog() -> Catalog {
    let departments = [
        "ACCT", "ARCH", "BIOL", "BMED", "CHEM", "CE", "COM", "CS", "DS", "ECE", "ECON", "EM",
        "ENGL", "ENTR", "ENV", "FIN", "FRSC", "GEO", "HIST", "HUM", "IE", "INFO", "IS", "IT",
        "MATH", "ME", "MGMT", "MKTG", "MNET", "MUS", "PHIL", "PHYS", "POLS", "PSY", "ROBO", "SOC",
        "STS", "SWE", "THTR", "URB",
    ];

    let mut courses = BTreeMap::new();
    for department in departments {
        for number in 0..120 {
            let name = format!("{department} {:03}", 100 + number);
            let prereq_tree = (number > 0).then(|| {
                RequirementNode::group(
                    GroupKind::And,
                    vec![
                        RequirementNode::course(format!("{department} {:03}", 100 + number - 1)),
                        RequirementNode::group(
                            GroupKind::Or,
                            vec![
                                RequirementNode::course(format!("MATH {:03}", 100 + number % 20)),
                                RequirementNode::course(format!("PHYS {:03}", 100 + number % 20)),
                            ],
                        ),
                    ],
                )
            });
            courses.insert(
                name,
                CourseInfo {
                    prereq_tree,
                    ..CourseInfo::empty()
                },
            );
        }
    }
    Catalog::new(courses)
}

fn filter_courses(c: &mut Criterion) {
    let catalog = preseed_catalog();

    c.bench_function("search filter", |b| {
        let mut session = Session::new(&catalog);
        session.set_search("10");
        b.iter(|| session.filtered_by_search());
    });

    c.bench_function("search and department filter", |b| {
        let mut session = Session::new(&catalog);
        session.set_search("1");
        session.set_department(Some("CS".to_string()));
        b.iter(|| session.displayed());
    });

    c.bench_function("capped graph with edges", |b| {
        let session = Session::new(&catalog);
        b.iter(|| {
            let visible = session.visible_in_graph();
            graph::edges(&catalog, &visible)
        });
    });
}

criterion_group!(benches, filter_courses);
criterion_main!(benches);
