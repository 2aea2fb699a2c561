use super::*;

fn scales(v: &[f64]) -> Vec<Scale> {
    v.iter().map(|&s| Scale::new(s).unwrap()).collect()
}

#[test]
fn one_directive_per_scale_with_base_dpi_multiples() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let mut p = ExportPlanner::new(&out, &scales(&[1.0, 2.0, 3.0]));

    let ds = p.directives("a1", "icon").unwrap();
    let got: Vec<_> = ds.iter().map(|d| (d.filename.clone(), d.dpi)).collect();
    assert_eq!(
        got,
        vec![
            (out.join("icon.png"), 96),
            (out.join("icon@2x.png"), 192),
            (out.join("icon@3x.png"), 288),
        ]
    );
    assert!(ds.iter().all(|d| d.id == "a1"));
    assert!(out.is_dir());
}

#[test]
fn empty_scale_list_falls_back_to_defaults() {
    let p = ExportPlanner::new("out", &[]);
    assert_eq!(p.scales(), Scale::defaults().as_slice());
}

#[test]
fn nested_filenames_create_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let mut p = ExportPlanner::new(dir.path(), &scales(&[1.0]));
    let ds = p.directives("a", "icons/small/home").unwrap();
    assert_eq!(ds[0].filename, dir.path().join("icons/small/home.png"));
    assert!(dir.path().join("icons/small").is_dir());
}

#[test]
fn directories_are_created_once() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let mut p = ExportPlanner::new(&out, &scales(&[1.0, 2.0]));
    p.directives("a", "one").unwrap();
    assert_eq!(p.created_dirs.len(), 1);

    // Removing the directory behind the planner's back shows it is not re-created.
    std::fs::remove_dir(&out).unwrap();
    p.directives("b", "two").unwrap();
    assert!(!out.exists());
}

#[test]
fn item_count_times_scale_count() {
    let dir = tempfile::tempdir().unwrap();
    for n_scales in 1..=3 {
        let list = scales(&[1.0, 2.0, 4.0][..n_scales]);
        let mut p = ExportPlanner::new(dir.path(), &list);
        let mut total = 0;
        for item in 0..5 {
            let ds = p.directives(&format!("id{item}"), &format!("f{item}")).unwrap();
            for (d, s) in ds.iter().zip(&list) {
                assert_eq!(d.dpi, (96.0 * s.get()) as u32);
            }
            total += ds.len();
        }
        assert_eq!(total, 5 * n_scales);
    }
}
