//! Static catalog of known Corda artifacts.
//!
//! Each entry maps a set of aliases to a file name template and a download
//! URL template; both contain a `{version}` placeholder. The catalog is
//! built once at startup and handed by reference to the resolver and fetcher.

use crate::template;
use std::fmt;

/// Source repository of an artifact; also the storage subdirectory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoKind {
    /// Corda Enterprise.
    Ce,
    /// Corda open source releases.
    Os,
    /// Enterprise Network Manager.
    Enm,
}

impl RepoKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RepoKind::Ce => "ce",
            RepoKind::Os => "os",
            RepoKind::Enm => "enm",
        }
    }
}

impl fmt::Display for RepoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One downloadable artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactEntry {
    pub name_template: &'static str,
    pub repo_kind: RepoKind,
    pub aliases: &'static [&'static str],
    pub url_template: &'static str,
}

impl ArtifactEntry {
    /// Local file name for `version`.
    pub fn file_name(&self, version: &str) -> String {
        template::render(self.name_template, version)
    }

    /// Download URL for `version`.
    pub fn url(&self, version: &str) -> String {
        template::render(self.url_template, version)
    }

    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.contains(&alias)
    }
}

/// Ordered, immutable list of artifact entries.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<ArtifactEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<ArtifactEntry>) -> Self {
        Self { entries }
    }

    /// The catalog of artifacts published to the Corda artifact repositories.
    pub fn builtin() -> Self {
        Self::new(builtin_entries())
    }

    pub fn entries(&self) -> &[ArtifactEntry] {
        &self.entries
    }

    /// All aliases in catalog order, paired with the index of their entry.
    pub fn aliases(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .flat_map(|(i, e)| e.aliases.iter().map(move |a| (*a, i)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

macro_rules! ce {
    ($path:literal) => {
        concat!(
            "https://ci-artifactory.corda.r3cev.com/artifactory/corda-enterprise/com/r3/corda/",
            $path
        )
    };
}

macro_rules! enm {
    ($path:literal) => {
        concat!(
            "https://software.r3.com/artifactory/r3-enterprise-network-manager/com/r3/enm/",
            $path
        )
    };
}

fn builtin_entries() -> Vec<ArtifactEntry> {
    vec![
        ArtifactEntry {
            name_template: "corda-{version}.jar",
            repo_kind: RepoKind::Ce,
            aliases: &["corda", "cecorda"],
            url_template: ce!("corda/{version}/corda-{version}.jar"),
        },
        ArtifactEntry {
            name_template: "jmeter-corda-{version}-testsuite.zip",
            repo_kind: RepoKind::Ce,
            aliases: &["jmeter", "corda-jmeter", "jmeter-corda"],
            url_template: ce!("jmeter-corda/{version}/jmeter-corda-{version}-testsuite.zip"),
        },
        ArtifactEntry {
            name_template: "corda-tools-network-bootstrapper-{version}.jar",
            repo_kind: RepoKind::Ce,
            aliases: &[
                "tools-network-bootstrapper",
                "corda-tools-network-bootstrapper",
                "network-bootstrapper",
                "bootstrapper",
            ],
            url_template: ce!(
                "corda-tools-network-bootstrapper/{version}/corda-tools-network-bootstrapper-{version}.jar"
            ),
        },
        ArtifactEntry {
            name_template: "corda-tools-ha-utilities-{version}.jar",
            repo_kind: RepoKind::Ce,
            aliases: &[
                "corda-tools-ha-utilities",
                "tools-ha-utilities",
                "ha-utilities",
                "ha-utils",
                "hautilities",
                "hautils",
            ],
            url_template: ce!(
                "corda-tools-ha-utilities/{version}/corda-tools-ha-utilities-{version}.jar"
            ),
        },
        ArtifactEntry {
            name_template: "tools-database-manager-{version}.jar",
            repo_kind: RepoKind::Ce,
            aliases: &["database-manager", "tools-database-manager", "dbmtool"],
            url_template: ce!("tools-database-manager/{version}/tools-database-manager-{version}.jar"),
        },
        ArtifactEntry {
            name_template: "corda-finance-workflows-{version}.jar",
            repo_kind: RepoKind::Ce,
            aliases: &["corda-finance-workflows", "finance-workflows", "workflows"],
            url_template: ce!(
                "corda-finance-workflows/{version}/corda-finance-workflows-{version}.jar"
            ),
        },
        ArtifactEntry {
            name_template: "corda-finance-contracts-{version}.jar",
            repo_kind: RepoKind::Os,
            aliases: &["corda-finance-contracts", "finance-contracts", "contracts"],
            url_template: concat!(
                "https://ci-artifactory.corda.r3cev.com/artifactory/corda-releases/net/corda/",
                "corda-finance-contracts/{version}/corda-finance-contracts-{version}.jar"
            ),
        },
        ArtifactEntry {
            name_template: "corda-testserver-{version}.jar",
            repo_kind: RepoKind::Ce,
            aliases: &["testserver"],
            url_template: ce!("corda-testserver/{version}/corda-testserver-{version}.jar"),
        },
        ArtifactEntry {
            name_template: "pki-tool-{version}.zip",
            repo_kind: RepoKind::Enm,
            aliases: &["pki-tool", "pkitool"],
            url_template: enm!("tools/pki-tool/{version}/pki-tool-{version}.zip"),
        },
        ArtifactEntry {
            name_template: "identitymanager-{version}.zip",
            repo_kind: RepoKind::Enm,
            aliases: &["identitymanager", "idman"],
            url_template: enm!("services/identitymanager/{version}/identitymanager-{version}.zip"),
        },
        ArtifactEntry {
            name_template: "signer-{version}.zip",
            repo_kind: RepoKind::Enm,
            aliases: &["signer"],
            url_template: enm!("services/signer/{version}/signer-{version}.zip"),
        },
        ArtifactEntry {
            name_template: "networkmap-{version}.zip",
            repo_kind: RepoKind::Enm,
            aliases: &["networkmap", "nm"],
            url_template: enm!("services/networkmap/{version}/networkmap-{version}.zip"),
        },
        ArtifactEntry {
            name_template: "smr-{version}.zip",
            repo_kind: RepoKind::Enm,
            aliases: &["smr"],
            url_template: enm!("services/smr/{version}/smr-{version}.zip"),
        },
        ArtifactEntry {
            name_template: "angel-{version}.zip",
            repo_kind: RepoKind::Enm,
            aliases: &["angel"],
            url_template: enm!("services/angel/{version}/angel-{version}.zip"),
        },
        ArtifactEntry {
            name_template: "auth-{version}.zip",
            repo_kind: RepoKind::Enm,
            aliases: &["auth"],
            url_template: enm!("services/auth/{version}/auth-{version}.zip"),
        },
        ArtifactEntry {
            name_template: "bundled-{version}.zip",
            repo_kind: RepoKind::Enm,
            aliases: &["bundled"],
            url_template: enm!("services/bundled/{version}/bundled-{version}.zip"),
        },
        ArtifactEntry {
            name_template: "zone-{version}.zip",
            repo_kind: RepoKind::Enm,
            aliases: &["zone"],
            url_template: enm!("services/zone/{version}/zone-{version}.zip"),
        },
        ArtifactEntry {
            name_template: "zoneservice-{version}.zip",
            repo_kind: RepoKind::Enm,
            aliases: &["zoneservice"],
            url_template: enm!("services/zoneservice/{version}/zoneservice-{version}.zip"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

const CE_REPO: &str = "https://ci-artifactory.corda.r3cev.com/artifactory/corda-enterprise/com/r3/corda";
const OS_REPO: &str = "https://ci-artifactory.corda.r3cev.com/artifactory/corda-releases/net/corda";
const ENM_REPO: &str = "https://software.r3.com/artifactory/r3-enterprise-network-manager/com/r3/enm";

    #[test]
    fn builtin_has_every_known_artifact() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 18);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn aliases_are_unique_across_entries() {
        let catalog = Catalog::builtin();
        let mut seen = HashSet::new();
        for (alias, _) in catalog.aliases() {
            assert!(seen.insert(alias), "duplicate alias {alias}");
        }
    }

    #[test]
    fn templates_carry_version_placeholder() {
        for entry in Catalog::builtin().entries() {
            assert!(entry.name_template.contains("{version}"), "{:?}", entry);
            assert!(entry.url_template.contains("{version}"), "{:?}", entry);
            assert!(!entry.aliases.is_empty());
        }
    }

    #[test]
    fn url_ends_with_file_name() {
        for entry in Catalog::builtin().entries() {
            let name = entry.file_name("4.9");
            let url = entry.url("4.9");
            assert!(url.ends_with(&format!("/{name}")), "{url} vs {name}");
        }
    }

    #[test]
    fn repo_kind_matches_repository() {
        for entry in Catalog::builtin().entries() {
            let prefix = match entry.repo_kind {
                RepoKind::Ce => CE_REPO,
                RepoKind::Os => OS_REPO,
                RepoKind::Enm => ENM_REPO,
            };
            assert!(entry.url_template.starts_with(prefix), "{:?}", entry);
        }
    }

    #[test]
    fn repo_kind_display() {
        assert_eq!(RepoKind::Ce.to_string(), "ce");
        assert_eq!(RepoKind::Os.to_string(), "os");
        assert_eq!(RepoKind::Enm.to_string(), "enm");
    }

    #[test]
    fn bootstrapper_entry_renders() {
        let catalog = Catalog::builtin();
        let entry = catalog
            .entries()
            .iter()
            .find(|e| e.has_alias("bootstrapper"))
            .unwrap();
        assert_eq!(
            entry.file_name("4.9"),
            "corda-tools-network-bootstrapper-4.9.jar"
        );
        assert_eq!(
            entry.url("4.9"),
            "https://ci-artifactory.corda.r3cev.com/artifactory/corda-enterprise/com/r3/corda/corda-tools-network-bootstrapper/4.9/corda-tools-network-bootstrapper-4.9.jar"
        );
    }
}
