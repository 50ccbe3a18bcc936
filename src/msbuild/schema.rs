//! Element types of an MSBuild C/C++ project file.

use crate::core::document::Document;
use crate::core::schema::{element, Create, Element};
use crate::error::Result;

/// The MSBuild XML namespace stamped on every project root.
pub const XMLNS: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

element! {
    /// A generic labelled group.
    pub struct Group("Group") {
        attr label = "Label";
    }
}

impl Create for Group {
    type Args = Option<String>;

    fn init(&self, doc: &mut Document, label: Self::Args) -> Result<()> {
        self.set_label(doc, label.as_deref())
    }
}

element! {
    /// A property group; the `Globals` group carries the project identity.
    pub struct PropertyGroup("PropertyGroup") {
        attr label = "Label";
        child app_container_application = "AppContainerApplication";
        child application_type = "ApplicationType";
        child application_type_revision = "ApplicationTypeRevision";
        child custom_build_after_targets = "CustomBuildAfterTargets";
        child custom_build_before_targets = "CustomBuildBeforeTargets";
        child default_language = "DefaultLanguage";
        child enable_dot_net_native_compatible_profile = "EnableDotNetNativeCompatibleProfile";
        child keyword = "Keyword";
        child minimum_visual_studio_version = "MinimumVisualStudioVersion";
        child platform = "Platform";
        child project_guid = "ProjectGUID";
        child project_name = "ProjectName";
        child root_namespace = "RootNamespace";
        child windows_target_platform_min_version = "WindowsTargetPlatformMinVersion";
        child windows_target_platform_version = "WindowsTargetPlatformVersion";
    }
}

impl Create for PropertyGroup {
    type Args = Option<String>;

    fn init(&self, doc: &mut Document, label: Self::Args) -> Result<()> {
        self.set_label(doc, label.as_deref())
    }
}

element! {
    pub struct ItemGroup("ItemGroup") {
        attr label = "Label";
    }
}

impl Create for ItemGroup {
    type Args = Option<String>;

    fn init(&self, doc: &mut Document, label: Self::Args) -> Result<()> {
        self.set_label(doc, label.as_deref())
    }
}

element! {
    pub struct ItemDefinitionGroup("ItemDefinitionGroup") {
        attr label = "Label";
        attr condition = "Condition";
    }
}

impl Create for ItemDefinitionGroup {
    type Args = Option<String>;

    fn init(&self, doc: &mut Document, condition: Self::Args) -> Result<()> {
        self.set_condition(doc, condition.as_deref())
    }
}

element! {
    /// One `Configuration|Platform` pair the project can be built for.
    pub struct ProjectConfiguration("ProjectConfiguration") {
        attr include = "Include";
        child configuration = "Configuration";
        child platform = "Platform";
    }
}

impl ProjectConfiguration {
    /// Returns the MSBuild condition that selects this configuration.
    pub fn condition(&self, doc: &Document) -> String {
        format!(
            "'$(Configuration)|$(Platform)' == '{}'",
            self.include(doc)
        )
    }
}

impl Create for ProjectConfiguration {
    /// The configuration name and the platform.
    type Args = (String, String);

    fn init(&self, doc: &mut Document, args: Self::Args) -> Result<()> {
        let (config, platform) = args;
        self.set_configuration(doc, Some(&config))?;
        self.set_platform(doc, Some(&platform))?;
        self.set_include(doc, Some(&format!("{}|{}", config, platform)))
    }
}

element! {
    pub struct ProjectConfigurationsItemGroup("ItemGroup") {
        attr label = "Label";
    }
    compose {
        project_configuration: ProjectConfiguration,
    }
}

impl Create for ProjectConfigurationsItemGroup {
    type Args = ();

    fn init(&self, doc: &mut Document, _: Self::Args) -> Result<()> {
        self.set_label(doc, Some("ProjectConfigurations"))
    }
}

element! {
    pub struct ConfigurationPropertyGroup("PropertyGroup") {
        attr label = "Label";
        attr condition = "Condition";
        child configuration_type = "ConfigurationType" in ["Application", "SharedLibrary", "StaticLibrary"];
        child platform_toolset = "PlatformToolset" in ["v110", "v120", "v110_xp", "v120_xp", "v140", "v140_xp"];
        child character_set = "CharacterSet" in ["MultiByte"];
    }
}

impl Create for ConfigurationPropertyGroup {
    /// The condition of the project configuration the group applies to.
    type Args = String;

    fn init(&self, doc: &mut Document, condition: Self::Args) -> Result<()> {
        self.set_label(doc, Some("Configuration"))?;
        self.set_condition(doc, Some(&condition))
    }
}

element! {
    pub struct Import("Import") {
        attr project = "Project";
        attr condition = "Condition";
    }
}

impl Create for Import {
    type Args = String;

    fn init(&self, doc: &mut Document, project: Self::Args) -> Result<()> {
        self.set_project(doc, Some(&project))
    }
}

element! {
    pub struct ImportGroup("ImportGroup") {
        attr label = "Label";
        attr condition = "Condition";
    }
    compose {
        import: Import,
    }
}

impl Create for ImportGroup {
    type Args = Option<String>;

    fn init(&self, doc: &mut Document, label: Self::Args) -> Result<()> {
        self.set_label(doc, label.as_deref())
    }
}

element! {
    /// Compiler settings, either for one source file or as the project default.
    pub struct ClCompile("ClCompile") {
        attr include = "Include";
        child additional_include_directories = "AdditionalIncludeDirectories";
        child additional_options = "AdditionalOptions";
        child additional_using_directories = "AdditionalUsingDirectories";
        child always_append = "AlwaysAppend";
        child assembler_listing_location = "AssemblerListingLocation";
        child assembler_output = "AssemblerOutput" in ["NoListing", "AssemblyCode", "AssemblyAndMachineCode", "AssemblyAndSourceCode", "All"];
        child basic_runtime_checks = "BasicRuntimeChecks" in ["Default", "StackFrameRuntimeCheck", "UninitializedLocalUsageCheck", "EnableFastChecks"];
        child browse_information = "BrowseInformation" in ["false", "true"];
        child browse_information_file = "BrowseInformationFile";
        child buffer_security_check = "BufferSecurityCheck" in ["false", "true"];
        child building_in_ide = "BuildingInIDE" in ["false", "true"];
        child calling_convention = "CallingConvention" in ["Cdecl", "FastCall", "StdCall"];
        child compile_as = "CompileAs" in ["Default", "CompileAsC", "CompileAsCpp"];
        child compile_as_managed = "CompileAsManaged" in ["false", "true", "Pure", "Safe", "OldSyntax"];
        child compile_as_winrt = "CompileAsWinRT" in ["false", "true"];
        child create_hotpatchable_image = "CreateHotpatchableImage" in ["false", "true"];
        child debug_information_format = "DebugInformationFormat" in ["OldStyle", "ProgramDatabase", "EditAndContinue"];
        child disable_language_extensions = "DisableLanguageExtensions" in ["false", "true"];
        child disable_specific_warnings = "DisableSpecificWarnings";
        child enable_enhanced_instruction_set = "EnableEnhancedInstructionSet" in ["StreamingSIMDExtensions", "StreamingSIMDExtensions2"];
        child enable_fiber_safe_optimizations = "EnableFiberSafeOptimizations" in ["false", "true"];
        child enable_prefast = "EnablePREfast" in ["false", "true"];
        child error_reporting = "ErrorReporting" in ["None", "Prompt", "Queue", "Send"];
        child exception_handling = "ExceptionHandling" in ["false", "Async", "Sync", "SyncCThrow"];
        child expand_attributed_source = "ExpandAttributedSource" in ["false", "true"];
        child favor_size_or_speed = "FavorSizeOrSpeed" in ["Neither", "Size", "Speed"];
        child floating_point_exceptions = "FloatingPointExceptions" in ["false", "true"];
        child floating_point_model = "FloatingPointModel" in ["Precise", "Strict", "Fast"];
        child force_conformance_in_for_loop_scope = "ForceConformanceInForLoopScope" in ["false", "true"];
        child forced_include_files = "ForcedIncludeFiles";
        child forced_using_files = "ForcedUsingFiles";
        child function_level_linking = "FunctionLevelLinking" in ["false", "true"];
        child generate_xml_documentation_files = "GenerateXMLDocumentationFiles" in ["false", "true"];
        child ignore_standard_include_path = "IgnoreStandardIncludePath" in ["false", "true"];
        child inline_function_expansion = "InlineFunctionExpansion" in ["Default", "Disabled", "OnlyExplicitInline", "AnySuitable"];
        child intrinsic_functions = "IntrinsicFunctions" in ["false", "true"];
        child minimal_rebuild = "MinimalRebuild" in ["false", "true"];
        child multi_processor_compilation = "MultiProcessorCompilation" in ["false", "true"];
        child object_file_name = "ObjectFileName";
        child object_files = "ObjectFiles";
        child omit_default_lib_name = "OmitDefaultLibName" in ["false", "true"];
        child omit_frame_pointers = "OmitFramePointers" in ["false", "true"];
        child openmp_support = "OpenMPSupport" in ["false", "true"];
        child optimization = "Optimization" in ["Disabled", "MinSpace", "MaxSpeed", "Full"];
        child precompiled_header = "PrecompiledHeader" in ["NotUsing", "Create", "Use"];
        child precompiled_header_file = "PrecompiledHeaderFile";
        child precompiled_header_output_file = "PrecompiledHeaderOutputFile";
        child preprocess_keep_comments = "PreprocessKeepComments" in ["false", "true"];
        child preprocessor_definitions = "PreprocessorDefinitions";
        child preprocess_output = "PreprocessOutput";
        child preprocess_output_path = "PreprocessOutputPath";
        child preprocess_suppress_line_numbers = "PreprocessSuppressLineNumbers" in ["false", "true"];
        child preprocess_to_file = "PreprocessToFile" in ["false", "true"];
        child processor_number = "ProcessorNumber";
        child program_data_base_file_name = "ProgramDataBaseFileName";
        child runtime_library = "RuntimeLibrary" in ["MultiThreaded", "MultiThreadedDebug", "MultiThreadedDLL", "MultiThreadedDebugDLL"];
        child runtime_type_info = "RuntimeTypeInfo" in ["false", "true"];
        child show_includes = "ShowIncludes" in ["false", "true"];
        child smaller_type_check = "SmallerTypeCheck" in ["false", "true"];
        child sources = "Sources";
        child string_pooling = "StringPooling" in ["false", "true"];
        child struct_member_alignment = "StructMemberAlignment" in ["Default", "1Byte", "2Bytes", "4Bytes", "8Bytes", "16Bytes"];
        child suppress_startup_banner = "SuppressStartupBanner" in ["false", "true"];
        child tracker_log_directory = "TrackerLogDirectory";
        child treat_specific_warnings_as_errors = "TreatSpecificWarningsAsErrors";
        child treat_warning_as_error = "TreatWarningAsError";
        child treat_wchar_t_as_built_in_type = "TreatWChar_tAsBuiltInType" in ["false", "true"];
        child undefine_preprocessor_definitions = "UndefinePreprocessorDefinitions";
        child use_full_paths = "UseFullPaths" in ["false", "true"];
        child use_unicode_for_assembler_listing = "UseUnicodeForAssemblerListing" in ["false", "true"];
        child warning_level = "WarningLevel" in ["TurnOffAllWarnings", "Level1", "Level2", "Level3", "Level4", "EnableAllWarnings"];
        child whole_program_optimization = "WholeProgramOptimization" in ["false", "true"];
        child xml_documentation_file_name = "XMLDocumentationFileName";
        child minimal_rebuild_from_tracking = "MinimalRebuildFromTracking" in ["false", "true"];
        child tlog_read_files = "TLogReadFiles";
        child tlog_write_files = "TLogWriteFiles";
        child track_file_access = "TrackFileAccess" in ["false", "true"];
    }
}

impl Create for ClCompile {
    /// The source file, or `None` for the project-wide defaults.
    type Args = Option<String>;

    fn init(&self, doc: &mut Document, include: Self::Args) -> Result<()> {
        self.set_include(doc, include.as_deref())
    }
}

element! {
    /// Archiver settings.
    pub struct Lib("Lib") {
        child additional_dependencies = "AdditionalDependencies";
        child additional_library_directories = "AdditionalLibraryDirectories";
        child additional_options = "AdditionalOptions";
        child display_library = "DisplayLibrary";
        child error_reporting = "ErrorReporting" in ["NoErrorReport", "PromptImmediately", "QueueForNextLogin", "SendErrorReport"];
        child export_named_functions = "ExportNamedFunctions";
        child force_symbol_references = "ForceSymbolReferences";
        child ignore_all_default_libraries = "IgnoreAllDefaultLibraries" in ["false", "true"];
        child ignore_specific_default_libraries = "IgnoreSpecificDefaultLibraries";
        child link_library_dependencies = "LinkLibraryDependencies" in ["false", "true"];
        child link_time_code_generation = "LinkTimeCodeGeneration" in ["false", "true"];
        child minimum_required_version = "MinimumRequiredVersion";
        child module_definition_file = "ModuleDefinitionFile";
        child name = "Name";
        child output_file = "OutputFile";
        child remove_objects = "RemoveObjects";
        child sources = "Sources";
        child sub_system = "SubSystem" in ["Console", "Windows", "Native", "EFI Application", "EFI Boot Service Driver", "EFI ROM", "EFI Runtime", "WindowsCE", "POSIX"];
        child suppress_startup_banner = "SuppressStartupBanner" in ["false", "true"];
        child target_machine = "TargetMachine" in ["MachineARM", "MachineEBC", "MachineIA64", "MachineMIPS", "MachineMIPS16", "MachineMIPSFPU", "MachineMIPSFPU16", "MachineSH4", "MachineTHUMB", "MachineX64", "MachineX86"];
        child tracker_log_directory = "TrackerLogDirectory";
        child treat_lib_warning_as_errors = "TreatLibWarningAsErrors" in ["false", "true"];
        child use_unicode_response_files = "UseUnicodeResponseFiles" in ["false", "true"];
        child verbose = "Verbose" in ["false", "true"];
    }
}

impl Create for Lib {
    type Args = ();

    fn init(&self, _: &mut Document, _: Self::Args) -> Result<()> {
        Ok(())
    }
}

element! {
    /// Linker settings.
    pub struct Link("Link") {
        child additional_dependencies = "AdditionalDependencies";
        child additional_library_directories = "AdditionalLibraryDirectories";
        child additional_manifest_dependencies = "AdditionalManifestDependencies";
        child additional_options = "AdditionalOptions";
        child add_module_names_to_assembly = "AddModuleNamesToAssembly";
        child allow_isolation = "AllowIsolation" in ["false", "true"];
        child assembly_debug = "AssemblyDebug" in ["false", "true"];
        child assembly_link_resource = "AssemblyLinkResource";
        child attribute_file_tracking = "AttributeFileTracking" in ["false", "true"];
        child base_address = "BaseAddress";
        child building_in_ide = "BuildingInIDE" in ["false", "true"];
        child clr_image_type = "CLRImageType" in ["Default", "ForceIJWImage", "ForcePureILImage", "ForceSafeILImage"];
        child clr_support_last_error = "CLRSupportLastError" in ["Enabled", "Disabled", "SystemDlls"];
        child clr_thread_attribute = "CLRThreadAttribute" in ["DefaultThreadingAttribute", "MTAThreadingAttribute", "STAThreadingAttribute"];
        child clr_unmanaged_code_check = "CLRUnmanagedCodeCheck" in ["false", "true"];
        child create_hot_patchable_image = "CreateHotPatchableImage" in ["Enabled", "X86Image", "X64Image", "ItaniumImage"];
        child data_execution_prevention = "DataExecutionPrevention" in ["false", "true"];
        child delay_load_dlls = "DelayLoadDLLs";
        child delay_sign = "DelaySign" in ["false", "true"];
        child driver = "Driver" in ["NotSet", "Driver", "UpOnly", "WDM"];
        child embed_managed_resource_file = "EmbedManagedResourceFile";
        child enable_comdat_folding = "EnableCOMDATFolding" in ["false", "true"];
        child enable_uac = "EnableUAC" in ["false", "true"];
        child entry_point_symbol = "EntryPointSymbol";
        child fixed_base_address = "FixedBaseAddress" in ["false", "true"];
        child force_file_output = "ForceFileOutput" in ["Enabled", "MultiplyDefinedSymbolOnly", "UndefinedSymbolOnly"];
        child force_symbol_references = "ForceSymbolReferences";
        child function_order = "FunctionOrder";
        child generate_debug_information = "GenerateDebugInformation" in ["false", "true"];
        child generate_manifest = "GenerateManifest" in ["false", "true"];
        child generate_map_file = "GenerateMapFile" in ["false", "true"];
        child heap_commit_size = "HeapCommitSize";
        child heap_reserve_size = "HeapReserveSize";
        child ignore_all_default_libraries = "IgnoreAllDefaultLibraries" in ["false", "true"];
        child ignore_embedded_idl = "IgnoreEmbeddedIDL" in ["false", "true"];
        child ignore_import_library = "IgnoreImportLibrary" in ["false", "true"];
        child ignore_specific_default_libraries = "IgnoreSpecificDefaultLibraries";
        child image_has_safe_exception_handlers = "ImageHasSafeExceptionHandlers" in ["false", "true"];
        child import_library = "ImportLibrary";
        child key_container = "KeyContainer";
        child key_file = "KeyFile";
        child large_address_aware = "LargeAddressAware" in ["false", "true"];
        child link_dll = "LinkDLL" in ["false", "true"];
        child link_error_reporting = "LinkErrorReporting" in ["NoErrorReport", "PromptImmediately", "QueueForNextLogin", "SendErrorReport"];
        child link_incremental = "LinkIncremental" in ["false", "true"];
        child link_library_dependencies = "LinkLibraryDependencies" in ["false", "true"];
        child link_status = "LinkStatus" in ["false", "true"];
        child link_time_code_generation = "LinkTimeCodeGeneration" in ["false", "true"];
        child manifest_file = "ManifestFile";
        child map_exports = "MapExports" in ["false", "true"];
        child map_file_name = "MapFileName";
        child merged_idl_base_file_name = "MergedIDLBaseFileName";
        child merge_sections = "MergeSections";
        child midl_command_file = "MidlCommandFile";
        child minimum_required_version = "MinimumRequiredVersion";
        child module_definition_file = "ModuleDefinitionFile";
        child msdos_stub_file_name = "MSDOSStubFileName";
        child no_entry_point = "NoEntryPoint" in ["false", "true"];
        child object_files = "ObjectFiles";
        child optimize_references = "OptimizeReferences" in ["false", "true"];
        child output_file = "OutputFile";
        child per_user_redirection = "PerUserRedirection" in ["false", "true"];
        child preprocess_output = "PreprocessOutput";
        child prevent_dll_binding = "PreventDllBinding" in ["false", "true"];
        child profile = "Profile" in ["false", "true"];
        child profile_guided_database = "ProfileGuidedDatabase";
        child program_database_file = "ProgramDatabaseFile";
        child randomized_base_address = "RandomizedBaseAddress" in ["false", "true"];
        child register_output = "RegisterOutput" in ["false", "true"];
        child section_alignment = "SectionAlignment";
        child set_checksum = "SetChecksum" in ["false", "true"];
        child show_progress = "ShowProgress" in ["NotSet", "LinkVerbose", "LinkVerboseLib", "LinkVerboseICF", "LinkVerboseREF", "LinkVerboseSAFESEH", "LinkVerboseCLR"];
        child sources = "Sources";
        child specify_section_attributes = "SpecifySectionAttributes";
        child stack_commit_size = "StackCommitSize";
        child stack_reserve_size = "StackReserveSize";
        child strip_private_symbols = "StripPrivateSymbols";
        child sub_system = "SubSystem" in ["Console", "Windows", "Native", "EFI Application", "EFI Boot Service Driver", "EFI ROM", "EFI Runtime", "WindowsCE", "POSIX"];
        child support_nobind_of_delay_loaded_dll = "SupportNobindOfDelayLoadedDLL" in ["false", "true"];
        child support_unload_of_delay_loaded_dll = "SupportUnloadOfDelayLoadedDLL" in ["false", "true"];
        child suppress_startup_banner = "SuppressStartupBanner" in ["false", "true"];
        child swap_run_from_cd = "SwapRunFromCD" in ["false", "true"];
        child swap_run_from_net = "SwapRunFromNET" in ["false", "true"];
        child target_machine = "TargetMachine" in ["MachineARM", "MachineEBC", "MachineIA64", "MachineMIPS", "MachineMIPS16", "MachineMIPSFPU", "MachineMIPSFPU16", "MachineSH4", "MachineTHUMB", "MachineX64", "MachineX86"];
        child terminal_server_aware = "TerminalServerAware" in ["false", "true"];
        child tracker_log_directory = "TrackerLogDirectory";
        child treat_linker_warning_as_errors = "TreatLinkerWarningAsErrors" in ["false", "true"];
        child turn_off_assembly_generation = "TurnOffAssemblyGeneration" in ["false", "true"];
        child type_library_file = "TypeLibraryFile";
        child type_library_resource_id = "TypeLibraryResourceID";
        child uac_execution_level = "UACExecutionLevel" in ["AsInvoker", "HighestAvailable", "RequireAdministrator"];
        child uac_ui_access = "UACUIAccess" in ["false", "true"];
        child use_library_dependency_inputs = "UseLibraryDependencyInputs" in ["false", "true"];
        child version = "Version";
    }
}

impl Create for Link {
    type Args = ();

    fn init(&self, _: &mut Document, _: Self::Args) -> Result<()> {
        Ok(())
    }
}

element! {
    pub struct Reference("Reference") {
        attr include = "Include";
        child hint_path = "HintPath";
        child name = "Name";
        child fusion_name = "FusionName";
        child specific_version = "SpecificVersion" in ["false", "true"];
        child aliases = "Aliases";
        child private = "Private" in ["false", "true"];
    }
}

element! {
    pub struct ComReference("COMReference") {
        attr include = "Include";
        child name = "Name";
        child guid = "Guid";
        child version_major = "VersionMajor";
        child version_minor = "VersionMinor";
        child lcid = "LCID";
        child wrapper_tool = "WrapperTool";
    }
}

element! {
    pub struct ComFileReference("COMFileReference") {
        attr include = "Include";
        child wrapper_tool = "WrapperTool";
    }
}

element! {
    pub struct NativeReference("NativeReference") {
        attr include = "Include";
        child hint_path = "HintPath";
        child name = "Name";
    }
}

element! {
    pub struct ProjectReference("ProjectReference") {
        attr include = "Include";
        child name = "Name";
        child project = "Project";
        child package = "Package";
    }
}

element! {
    /// A file copied or published alongside the build output.
    pub struct Content("Content") {
        attr include = "Include";
        child dependent_upon = "DependentUpon";
        child generator = "Generator";
        child last_gen_output = "LastGenOutput";
        child custom_tool_namespace = "CustomToolNamespace";
        child link = "Link" in ["false", "true"];
        child publish_state = "PublishState" in ["Default", "Included", "Excluded", "DataFile", "Prerequisite"];
        child is_assembly = "IsAssembly" in ["false", "true"];
        child visible = "Visible" in ["false", "true"];
        child copy_to_output_directory = "CopyToOutputDirectory" in ["Never", "Always", "PreserveNewest"];
    }
}

element! {
    /// A file that is part of the project but takes no part in the build.
    pub struct NoneItem("None") {
        attr include = "Include";
        child dependent_upon = "DependentUpon";
        child generator = "Generator";
        child last_gen_output = "LastGenOutput";
        child custom_tool_namespace = "CustomToolNamespace";
        child link = "Link" in ["false", "true"];
        child publish_state = "PublishState" in ["Default", "Included", "Excluded", "DataFile", "Prerequisite"];
        child is_assembly = "IsAssembly" in ["false", "true"];
        child visible = "Visible" in ["false", "true"];
        child copy_to_output_directory = "CopyToOutputDirectory" in ["Never", "Always", "PreserveNewest"];
    }
}

/// Implements [Create] for item elements built from their `Include` path.
macro_rules! create_by_include {
    ($($t:ty),*) => {
        $(impl Create for $t {
            type Args = String;

            fn init(&self, doc: &mut Document, include: Self::Args) -> Result<()> {
                self.set_include(doc, Some(&include))
            }
        })*
    };
}

create_by_include!(
    Reference,
    ComReference,
    ComFileReference,
    NativeReference,
    ProjectReference,
    Content,
    NoneItem
);

element! {
    pub struct CustomBuild("CustomBuild") {
        attr include = "Include";
        child command = "Command";
        child message = "Message";
        child outputs = "Outputs";
    }
}

impl Create for CustomBuild {
    type Args = Option<String>;

    fn init(&self, doc: &mut Document, include: Self::Args) -> Result<()> {
        self.set_include(doc, include.as_deref())
    }
}

element! {
    pub struct CustomBuildStep("CustomBuildStep") {
        child command = "Command";
        child inputs = "Inputs";
        child outputs = "Outputs";
    }
}

impl Create for CustomBuildStep {
    type Args = ();

    fn init(&self, _: &mut Document, _: Self::Args) -> Result<()> {
        Ok(())
    }
}

element! {
    /// Output layout of a C/C++ project.
    pub struct CxxPropertyGroup("PropertyGroup") {
        attr label = "Label";
        attr condition = "Condition";
        child int_dir = "IntDir";
        child generate_manifest = "GenerateManifest";
        child link_incremental = "LinkIncremental";
        child out_dir = "OutDir";
        child target_dir = "TargetDir";
        child target_name = "TargetName";
        child target_ext = "TargetExt";
        child target_path = "TargetPath";
    }
}

impl Create for CxxPropertyGroup {
    type Args = Option<String>;

    fn init(&self, doc: &mut Document, condition: Self::Args) -> Result<()> {
        self.set_condition(doc, condition.as_deref())
    }
}

element! {
    /// The items of a C/C++ project.
    pub struct CxxItemGroup("ItemGroup") {
        attr label = "Label";
    }
    compose {
        cl_compile: ClCompile,
        custom_build: CustomBuild,
        reference: Reference,
        com_reference: ComReference,
        com_file_reference: ComFileReference,
        native_reference: NativeReference,
        project_reference: ProjectReference,
        content: Content,
        none: NoneItem,
    }
}

impl Create for CxxItemGroup {
    type Args = ();

    fn init(&self, _: &mut Document, _: Self::Args) -> Result<()> {
        Ok(())
    }
}

element! {
    /// Tool defaults of a C/C++ project.
    pub struct CxxItemDefinitionGroup("ItemDefinitionGroup") {
        attr label = "Label";
        attr condition = "Condition";
    }
    compose {
        cl_compile: ClCompile,
        custom_build_step: CustomBuildStep,
        lib: Lib,
        link: Link,
    }
}

impl Create for CxxItemDefinitionGroup {
    type Args = Option<String>;

    fn init(&self, doc: &mut Document, condition: Self::Args) -> Result<()> {
        self.set_condition(doc, condition.as_deref())
    }
}

element! {
    /// The root of an MSBuild project file.
    pub struct Project("Project") {
        attr default_targets = "DefaultTargets";
        attr tools_version = "ToolsVersion";
        attr xmlns = "xmlns";
    }
    compose {
        project_configurations: ProjectConfigurationsItemGroup,
        property_group: PropertyGroup,
        configuration_property_group: ConfigurationPropertyGroup,
        import: Import,
        import_group: ImportGroup,
        item_group: ItemGroup,
        item_definition_group: ItemDefinitionGroup,
        cxx_property_group: CxxPropertyGroup,
        cxx_item_group: CxxItemGroup,
        cxx_item_definition_group: CxxItemDefinitionGroup,
    }
}

impl Project {
    /// Creates a document whose root is a project stamped with the default
    /// target, tools version and namespace.
    pub fn new_document(tools_version: &str) -> Result<(Document, Self)> {
        let mut doc = Document::new(Self::TAG);
        let root = Self::from_id(doc.root());
        root.set_default_targets(&mut doc, Some("Build"))?;
        root.set_tools_version(&mut doc, Some(tools_version))?;
        root.set_xmlns(&mut doc, Some(XMLNS))?;
        Ok((doc, root))
    }
}
