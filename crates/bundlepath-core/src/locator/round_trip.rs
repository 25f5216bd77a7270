//! Forward then inverse lookups over every canonical placement.

use std::sync::Arc;
use std::thread;

use super::ExecutableLocator;
use crate::config::LocatorConfig;
use crate::domain::{BinaryType, Bundle, EXECUTABLE_KEY, InfoDictionary, InstallStyle, LayoutVersion};
use crate::paths::PathStyle;
use crate::platform::Platform;
use crate::ports::LocatorPorts;
use crate::test_utils::{MemoryFileSystem, StaticMetadata};

struct Case {
    platform: Platform,
    root: &'static str,
    version: LayoutVersion,
    install_style: InstallStyle,
    name: &'static str,
    executable: &'static str,
}

fn locator(fs: &Arc<MemoryFileSystem>, platform: Platform) -> ExecutableLocator {
    ExecutableLocator::new(
        LocatorConfig::default().with_platform(platform),
        LocatorPorts::new(fs.clone(), Arc::new(StaticMetadata::default())),
    )
    .unwrap()
}

fn info(name: &str) -> InfoDictionary {
    [(EXECUTABLE_KEY, name)].into_iter().collect()
}

fn assert_round_trip(case: &Case) {
    let style = case.platform.conventions().path_style;
    let fs = Arc::new(MemoryFileSystem::new(style));
    fs.add_dir(case.root);
    fs.add_file(case.executable);
    let locator = locator(&fs, case.platform);
    let bundle = Bundle::new(case.root, case.version)
        .with_install_style(case.install_style)
        .with_info(info(case.name));

    let found = locator.executable_path(&bundle);
    assert_eq!(found.as_deref(), Some(case.executable), "forward lookup for {}", case.root);

    let root = locator.locate_bundle_for_executable(case.executable);
    assert_eq!(root.as_deref(), Some(case.root), "inverse lookup for {}", case.executable);
}

#[test]
fn native_placements_round_trip() {
    let cases = [
        Case {
            platform: Platform::MacOs,
            root: "/Apps/Foo",
            version: LayoutVersion::SupportFiles,
            install_style: InstallStyle::Native,
            name: "Foo",
            executable: "/Apps/Foo/Support Files/Executables/MacOS/Foo",
        },
        Case {
            platform: Platform::MacOs,
            root: "/Apps/Foo.app/Contents",
            version: LayoutVersion::Contents,
            install_style: InstallStyle::Native,
            name: "Foo",
            executable: "/Apps/Foo.app/Contents/MacOS/Foo",
        },
        Case {
            platform: Platform::MacOs,
            root: "/Apps/Foo.bundle",
            version: LayoutVersion::Flat,
            install_style: InstallStyle::Native,
            name: "Foo",
            executable: "/Apps/Foo.bundle/Foo",
        },
        Case {
            platform: Platform::MacOs,
            root: "/Apps/Foo",
            version: LayoutVersion::Legacy,
            install_style: InstallStyle::Native,
            name: "Foo",
            executable: "/Apps/Foo/MacOS/Foo",
        },
        Case {
            platform: Platform::Linux,
            root: "/opt/Foo",
            version: LayoutVersion::Flat,
            install_style: InstallStyle::Native,
            name: "Foo",
            executable: "/opt/Foo/Linux/libFoo.so",
        },
        Case {
            platform: Platform::FreeBsd,
            root: "/opt/Foo",
            version: LayoutVersion::SupportFiles,
            install_style: InstallStyle::Native,
            name: "Foo",
            executable: "/opt/Foo/Support Files/Executables/FreeBSD/Foo",
        },
    ];
    for case in &cases {
        assert_round_trip(case);
    }
}

#[test]
fn windows_placements_round_trip() {
    let cases = [
        Case {
            platform: Platform::Windows,
            root: "C:\\Program Files\\Foo",
            version: LayoutVersion::Flat,
            install_style: InstallStyle::Native,
            name: "Foo",
            executable: "C:\\Program Files\\Foo\\Windows\\Foo.dll",
        },
        Case {
            platform: Platform::Windows,
            root: "C:\\Program Files\\Foo",
            version: LayoutVersion::SupportFiles,
            install_style: InstallStyle::Native,
            name: "Foo",
            executable: "C:\\Program Files\\Foo\\Support Files\\Executables\\Foo.exe",
        },
        Case {
            platform: Platform::Windows,
            root: "C:\\Tools\\Foo.resources",
            version: LayoutVersion::Freestanding,
            install_style: InstallStyle::Freestanding,
            name: "Foo",
            executable: "C:\\Tools\\Foo.exe",
        },
    ];
    for case in &cases {
        assert_round_trip(case);
    }
}

#[test]
fn split_installs_round_trip() {
    let cases = [
        Case {
            platform: Platform::Linux,
            root: "/opt/tools/Foo.resources",
            version: LayoutVersion::Freestanding,
            install_style: InstallStyle::Freestanding,
            name: "Foo",
            executable: "/opt/tools/libFoo.so",
        },
        Case {
            platform: Platform::Linux,
            root: "/usr/share/tool.resources",
            version: LayoutVersion::Freestanding,
            install_style: InstallStyle::FhsInstalled,
            name: "tool",
            executable: "/usr/bin/tool",
        },
        Case {
            platform: Platform::FreeBsd,
            root: "/usr/local/share/Foo.resources",
            version: LayoutVersion::Freestanding,
            install_style: InstallStyle::FhsInstalled,
            name: "Foo",
            executable: "/usr/local/lib/libFoo.so",
        },
    ];
    for case in &cases {
        assert_round_trip(case);
    }
}

#[test]
fn fhs_lookup_probes_bin_dirs_in_order() {
    let fs = Arc::new(MemoryFileSystem::new(PathStyle::Posix));
    fs.add_dir("/usr/share/App.resources");
    fs.add_file("/usr/lib/tool");
    let locator = locator(&fs, Platform::FreeBsd);
    let bundle = Bundle::new("/usr/share/App.resources", LayoutVersion::Freestanding)
        .with_install_style(InstallStyle::FhsInstalled)
        .with_info(info("tool"));

    assert_eq!(locator.executable_path(&bundle).as_deref(), Some("/usr/lib/tool"));

    let bare_probes: Vec<String> = fs
        .probes()
        .into_iter()
        .filter(|probe| probe.ends_with("/tool"))
        .collect();
    assert_eq!(bare_probes, vec!["/usr/bin/tool", "/usr/sbin/tool", "/usr/lib/tool"]);
}

#[test]
fn fhs_lookup_takes_first_loadable_match() {
    let fs = Arc::new(MemoryFileSystem::new(PathStyle::Posix));
    fs.add_dir("/usr/share/App.resources");
    fs.add_file("/usr/sbin/tool");
    fs.add_file("/usr/lib/tool");
    let locator = locator(&fs, Platform::Linux);
    let bundle = Bundle::new("/usr/share/App.resources", LayoutVersion::Freestanding)
        .with_install_style(InstallStyle::FhsInstalled)
        .with_info(info("tool"));

    assert_eq!(locator.executable_path(&bundle).as_deref(), Some("/usr/sbin/tool"));
}

#[test]
fn fhs_auxiliary_lookup_resolves_libexec() {
    let fs = Arc::new(MemoryFileSystem::new(PathStyle::Posix));
    fs.add_dir("/usr/share/App.resources");
    fs.add_file("/usr/libexec/App.executables/helper");
    let locator = locator(&fs, Platform::Linux);
    let bundle = Bundle::new("/usr/share/App.resources", LayoutVersion::Freestanding)
        .with_install_style(InstallStyle::FhsInstalled);

    assert_eq!(
        locator.auxiliary_executable_path(&bundle, "helper").as_deref(),
        Some("/usr/libexec/App.executables/helper")
    );
}

#[test]
fn legacy_bundle_without_binary() {
    let fs = Arc::new(MemoryFileSystem::new(PathStyle::Posix));
    fs.add_dir("/Apps/Foo");
    let locator = locator(&fs, Platform::MacOs);
    let bundle = Bundle::new("/Apps/Foo", LayoutVersion::Legacy);

    assert_eq!(locator.executable_path(&bundle), None);
    assert_eq!(bundle.binary_type(), BinaryType::NoBinary);
}

#[test]
fn concurrent_first_lookups_agree() {
    let fs = Arc::new(MemoryFileSystem::new(PathStyle::Posix));
    fs.add_file("/Apps/Foo.app/Contents/MacOS/Foo");
    let locator = Arc::new(locator(&fs, Platform::MacOs));
    let bundle = Arc::new(
        Bundle::new("/Apps/Foo.app/Contents", LayoutVersion::Contents).with_info(info("Foo")),
    );

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let locator = Arc::clone(&locator);
            let bundle = Arc::clone(&bundle);
            thread::spawn(move || locator.executable_path(&bundle))
        })
        .collect();

    for handle in handles {
        let path = handle.join().unwrap();
        assert_eq!(path.as_deref(), Some("/Apps/Foo.app/Contents/MacOS/Foo"));
    }
    assert_eq!(
        bundle.cached_executable_path().as_deref(),
        Some("/Apps/Foo.app/Contents/MacOS/Foo")
    );
}
