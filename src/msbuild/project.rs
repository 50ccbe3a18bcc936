use super::schema::{
    ClCompile, ConfigurationPropertyGroup, CxxItemDefinitionGroup, CxxItemGroup,
    CxxPropertyGroup, Lib, Link, Project, ProjectConfiguration, PropertyGroup,
};
use crate::core::document::Document;
use crate::core::schema::Element;
use crate::error::Result;
use std::path::Path;

pub const CPP_DEFAULT_PROPS: &str = "$(VCTargetsPath)\\Microsoft.Cpp.Default.props";
pub const CPP_PROPS: &str = "$(VCTargetsPath)\\Microsoft.Cpp.props";
pub const CPP_TARGETS: &str = "$(VCTargetsPath)\\Microsoft.Cpp.targets";

/// A C/C++ project file under assembly.
///
/// The skeleton is laid out once in the order MSBuild evaluates it; tools and
/// features fill in the groups through the handles exposed here.
#[derive(Debug, Clone, PartialEq)]
pub struct CxxProject {
    doc: Document,
    root: Project,
    config: ProjectConfiguration,
    globals: PropertyGroup,
    config_props: ConfigurationPropertyGroup,
    user_macros: PropertyGroup,
    definitions: CxxItemDefinitionGroup,
    properties: CxxPropertyGroup,
    items: CxxItemGroup,
    clcompile: ClCompile,
    lib: Lib,
    link: Link,
}

impl CxxProject {
    pub fn new(tools_version: &str, configuration: &str, platform: &str) -> Result<Self> {
        let (mut doc, root) = Project::new_document(tools_version)?;
        let configs = root.create_project_configurations(&mut doc, ())?;
        let config = configs.create_project_configuration(
            &mut doc,
            (configuration.to_string(), platform.to_string()),
        )?;
        let condition = config.condition(&doc);

        let globals = root.create_property_group(&mut doc, Some(String::from("Globals")))?;
        root.create_import(&mut doc, CPP_DEFAULT_PROPS.to_string())?;
        let config_props = root.create_configuration_property_group(&mut doc, condition.clone())?;
        // later groups may read properties defined by these imports
        root.create_import(&mut doc, CPP_PROPS.to_string())?;
        let user_macros = root.create_property_group(&mut doc, Some(String::from("UserMacros")))?;
        let definitions = root.create_cxx_item_definition_group(&mut doc, Some(condition.clone()))?;
        let properties = root.create_cxx_property_group(&mut doc, Some(condition))?;
        let items = root.create_cxx_item_group(&mut doc, ())?;
        root.create_import(&mut doc, CPP_TARGETS.to_string())?;

        let clcompile = definitions.create_cl_compile(&mut doc, None)?;
        let lib = definitions.create_lib(&mut doc, ())?;
        let link = definitions.create_link(&mut doc, ())?;

        Ok(Self {
            doc: doc,
            root: root,
            config: config,
            globals: globals,
            config_props: config_props,
            user_macros: user_macros,
            definitions: definitions,
            properties: properties,
            items: items,
            clcompile: clcompile,
            lib: lib,
            link: link,
        })
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn root(&self) -> Project {
        self.root
    }

    pub fn config(&self) -> ProjectConfiguration {
        self.config
    }

    /// Returns the condition selecting this project's configuration.
    pub fn condition(&self) -> String {
        self.config.condition(&self.doc)
    }

    pub fn globals(&self) -> PropertyGroup {
        self.globals
    }

    pub fn config_props(&self) -> ConfigurationPropertyGroup {
        self.config_props
    }

    pub fn user_macros(&self) -> PropertyGroup {
        self.user_macros
    }

    pub fn definitions(&self) -> CxxItemDefinitionGroup {
        self.definitions
    }

    pub fn properties(&self) -> CxxPropertyGroup {
        self.properties
    }

    pub fn items(&self) -> CxxItemGroup {
        self.items
    }

    /// Returns the project-wide compiler defaults.
    pub fn clcompile(&self) -> ClCompile {
        self.clcompile
    }

    pub fn lib(&self) -> Lib {
        self.lib
    }

    pub fn link(&self) -> Link {
        self.link
    }

    /// Adds a compile item for the source file at `include`.
    pub fn add_compile_item(&mut self, include: &str) -> Result<ClCompile> {
        let items = self.items;
        items.create_cl_compile(&mut self.doc, Some(include.to_string()))
    }

    /// Lists the `Include` paths of the compile items in order.
    pub fn compile_items(&self) -> Vec<&str> {
        self.doc
            .children(self.items.id())
            .iter()
            .filter(|c| self.doc.tag(**c) == "ClCompile")
            .map(|c| self.doc.get_attribute(*c, "Include"))
            .collect()
    }

    pub fn serialize(&self) -> String {
        self.doc.serialize()
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        self.doc.write(path)
    }
}
