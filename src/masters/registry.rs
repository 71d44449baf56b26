//! The layout-master-set: page templates and sequence masters by name.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{Declaration, PageTemplate, SequenceMaster, SourceLocation};

/// Slot of a name in the shared master namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Template(usize),
    Sequence(usize),
}

/// What a `master-reference` resolves to.
#[derive(Debug, Clone, Copy)]
pub enum MasterReference<'a> {
    /// A simple page master, used for every page
    Template(&'a PageTemplate),
    /// A sequence master, consulted per page
    Sequence(&'a SequenceMaster),
}

/// Collects master declarations while the declarations section is read.
///
/// Names are checked for uniqueness on insertion; cross-template checks run
/// once in [`MasterSetBuilder::build`], when every template is known.
#[derive(Debug, Default)]
pub struct MasterSetBuilder {
    templates: Vec<PageTemplate>,
    sequence_masters: Vec<SequenceMaster>,
    names: HashMap<String, Slot>,
}

impl MasterSetBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate a builder from declarations, in order.
    pub fn from_declarations<'a>(
        declarations: impl IntoIterator<Item = &'a Declaration>,
    ) -> Result<Self> {
        let mut builder = Self::new();
        for declaration in declarations {
            builder.add_declaration(declaration.clone())?;
        }
        Ok(builder)
    }

    /// Register one declaration.
    pub fn add_declaration(&mut self, declaration: Declaration) -> Result<()> {
        match declaration {
            Declaration::SimplePageMaster(template) => self.register_template(template),
            Declaration::PageSequenceMaster(master) => self.register_sequence_master(master),
        }
    }

    /// Register a page template under its name.
    pub fn register_template(&mut self, template: PageTemplate) -> Result<()> {
        self.check_name(&template.name, template.location.as_ref())?;
        template.validate()?;

        let slot = Slot::Template(self.templates.len());
        self.names.insert(template.name.clone(), slot);
        self.templates.push(template);
        Ok(())
    }

    /// Register a sequence master under its name.
    pub fn register_sequence_master(&mut self, master: SequenceMaster) -> Result<()> {
        self.check_name(&master.name, master.location.as_ref())?;
        if master.sub_sequences.is_empty() {
            return Err(Error::InvalidTemplate {
                name: master.name,
                reason: "page-sequence-master needs at least one sub-sequence specifier"
                    .to_string(),
            });
        }

        let slot = Slot::Sequence(self.sequence_masters.len());
        self.names.insert(master.name.clone(), slot);
        self.sequence_masters.push(master);
        Ok(())
    }

    /// Whether a name is taken in either pool.
    pub fn exists_name(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    fn check_name(&self, name: &str, location: Option<&SourceLocation>) -> Result<()> {
        if self.exists_name(name) {
            return Err(Error::DuplicateName {
                name: name.to_string(),
                location: location.cloned(),
            });
        }
        Ok(())
    }

    /// Seal the declarations into a read-only master set.
    ///
    /// Fails on an empty set, on sequence masters referencing unknown page
    /// templates, and on region-name/class conflicts across templates.
    pub fn build(self) -> Result<LayoutMasterSet> {
        if self.names.is_empty() {
            return Err(Error::EmptyMasterSet);
        }

        let set = LayoutMasterSet {
            templates: self.templates,
            sequence_masters: self.sequence_masters,
            names: self.names,
        };

        for master in &set.sequence_masters {
            for reference in master.master_references() {
                if set.template(reference).is_none() {
                    return Err(Error::UnknownMaster {
                        name: reference.to_string(),
                        location: master.location.clone(),
                    });
                }
            }
        }

        set.validate_region_consistency()?;

        log::debug!(
            "Layout master set sealed: {} page templates, {} sequence masters",
            set.templates.len(),
            set.sequence_masters.len()
        );
        Ok(set)
    }
}

/// Read-only registry of page templates and sequence masters.
///
/// Owned by the document context and borrowed by every page sequence.
#[derive(Debug, Clone)]
pub struct LayoutMasterSet {
    templates: Vec<PageTemplate>,
    sequence_masters: Vec<SequenceMaster>,
    names: HashMap<String, Slot>,
}

impl LayoutMasterSet {
    /// Build and seal a master set from declarations.
    pub fn from_declarations<'a>(
        declarations: impl IntoIterator<Item = &'a Declaration>,
    ) -> Result<Self> {
        MasterSetBuilder::from_declarations(declarations)?.build()
    }

    /// Look up a page template by exact name.
    pub fn template(&self, name: &str) -> Option<&PageTemplate> {
        match self.names.get(name) {
            Some(Slot::Template(i)) => self.templates.get(*i),
            _ => None,
        }
    }

    /// Look up a sequence master by exact name.
    pub fn sequence_master(&self, name: &str) -> Option<&SequenceMaster> {
        match self.names.get(name) {
            Some(Slot::Sequence(i)) => self.sequence_masters.get(*i),
            _ => None,
        }
    }

    /// Resolve a page sequence's `master-reference`.
    pub fn resolve(&self, name: &str) -> Option<MasterReference<'_>> {
        match self.names.get(name)? {
            Slot::Template(i) => self.templates.get(*i).map(MasterReference::Template),
            Slot::Sequence(i) => self.sequence_masters.get(*i).map(MasterReference::Sequence),
        }
    }

    /// Page templates in declaration order.
    pub fn templates(&self) -> impl Iterator<Item = &PageTemplate> {
        self.templates.iter()
    }

    /// Sequence masters in declaration order.
    pub fn sequence_masters(&self) -> impl Iterator<Item = &SequenceMaster> {
        self.sequence_masters.iter()
    }

    /// Number of declared masters of both kinds.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no master is declared.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check that every user-visible region name maps to one region class.
    pub fn validate_region_consistency(&self) -> Result<()> {
        let mut all_regions: HashMap<&str, &'static str> = HashMap::new();

        for template in &self.templates {
            for region in &template.regions {
                let class = region.default_region_class();
                if let Some(&seen) = all_regions.get(region.name()) {
                    if seen != class {
                        return Err(Error::NameConflict {
                            region_name: region.name().to_string(),
                            class_a: seen.to_string(),
                            class_b: class.to_string(),
                            location: template.location.clone(),
                        });
                    }
                }
                all_regions.insert(region.name(), class);
            }
        }

        Ok(())
    }

    /// Whether any page template exposes a region under `region_name`.
    pub fn region_name_exists(&self, region_name: &str) -> bool {
        self.templates
            .iter()
            .any(|t| t.region_name_exists(region_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Region, RegionClass, SubSequence};

    fn builder_with(names: &[&str]) -> MasterSetBuilder {
        let mut builder = MasterSetBuilder::new();
        for name in names {
            builder
                .register_template(PageTemplate::letter(*name))
                .unwrap();
        }
        builder
    }

    #[test]
    fn test_register_and_lookup() {
        let mut builder = builder_with(&["odd", "even"]);
        builder
            .register_sequence_master(SequenceMaster::new(
                "book",
                vec![SubSequence::repeatable("odd", None)],
            ))
            .unwrap();

        let set = builder.build().unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.template("odd").map(|t| t.name.as_str()), Some("odd"));
        assert!(set.template("book").is_none());
        assert!(set.sequence_master("book").is_some());
        assert!(set.sequence_master("odd").is_none());
        assert!(matches!(set.resolve("book"), Some(MasterReference::Sequence(_))));
        assert!(matches!(set.resolve("even"), Some(MasterReference::Template(_))));
        assert!(set.resolve("missing").is_none());
    }

    #[test]
    fn test_duplicate_across_pools() {
        let mut builder = builder_with(&["cover"]);
        let err = builder
            .register_sequence_master(SequenceMaster::new(
                "cover",
                vec![SubSequence::single("cover")],
            ))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateName { ref name, .. } if name == "cover"));

        let err = builder
            .register_template(PageTemplate::a4("cover"))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateName { .. }));
    }

    #[test]
    fn test_empty_set_rejected() {
        assert!(matches!(
            MasterSetBuilder::new().build(),
            Err(Error::EmptyMasterSet)
        ));
    }

    #[test]
    fn test_unknown_reference_rejected() {
        let mut builder = builder_with(&["page"]);
        builder
            .register_sequence_master(SequenceMaster::new(
                "seq",
                vec![SubSequence::single("page"), SubSequence::single("nope")],
            ))
            .unwrap();
        assert!(matches!(
            builder.build(),
            Err(Error::UnknownMaster { ref name, .. }) if name == "nope"
        ));
    }

    #[test]
    fn test_region_conflict_detected_after_population() {
        let mut builder = MasterSetBuilder::new();
        builder
            .register_template(
                PageTemplate::letter("first")
                    .with_region(Region::side(RegionClass::Before, 30.0).with_name("header")),
            )
            .unwrap();
        builder
            .register_template(
                PageTemplate::letter("second")
                    .with_region(Region::side(RegionClass::After, 30.0).with_name("header")),
            )
            .unwrap();

        match builder.build() {
            Err(Error::NameConflict {
                region_name,
                class_a,
                class_b,
                ..
            }) => {
                assert_eq!(region_name, "header");
                assert_eq!(class_a, "xsl-region-before");
                assert_eq!(class_b, "xsl-region-after");
            }
            other => panic!("expected NameConflict, got {:?}", other),
        }
    }

    #[test]
    fn test_region_name_exists() {
        let mut builder = builder_with(&["plain"]);
        builder
            .register_template(
                PageTemplate::letter("headed")
                    .with_region(Region::side(RegionClass::Before, 30.0).with_name("header")),
            )
            .unwrap();
        let set = builder.build().unwrap();

        assert!(set.region_name_exists("header"));
        assert!(set.region_name_exists("xsl-region-body"));
        assert!(!set.region_name_exists("xsl-region-after"));
    }
}
