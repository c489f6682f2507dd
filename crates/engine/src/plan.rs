use std::path::PathBuf;

use recast_llm::{collect_stream, GenerateConfig, TextGenerator};
use recast_protocol::{between_tags, line_join, tagged, updated_files};

use crate::error::{EngineError, Result};

const PLAN_SYSTEM: &str = "\
<system-instruction>
Write a short plan for the requested code change. Do not write any code.
Just write a short plan in precise language, and briefly restate the objective in your own terms.
Only mention tasks that still need to be done; don't mention tasks that are already complete.
Mention which of the provided files (if any) you won't need to modify. Ignore unprovided files.
Think as long as you need before you begin.
Wrap the plan itself in a <plan> tag and use XML exclusively for formatting to keep the parser happy.
</system-instruction>";

const REWRITE_SYSTEM: &str = "\
<system-instruction>
You are an expert code rewriting assistant.
Your task is to rewrite the content of files according to user instructions.
After you are done rewriting all the requested files, summarize what you actually did.
For each file you rewrite, wrap the complete updated content in <updated-file name=\"filename.ext\">...</updated-file> tags.
You have already generated a plan, it is included here. Follow this plan carefully.
Also abide by the user's clarifications if there are any.
Output the entire updated content of each modified file, not just the changes.
You may output the files in whatever order you prefer.
If you don't need to modify a file, then don't output it!
Think as long as you need before writing each file.
Use XML exclusively for formatting to keep the parser happy.
</system-instruction>";

/// One plan-then-rewrite invocation
pub struct PlanRequest {
    /// Files offered for modification, as given on the command line. Only
    /// these may be written back.
    pub include_files: Vec<String>,

    /// Files provided as read-only context
    pub context_files: Vec<String>,

    /// The natural-language change request
    pub change_request: String,

    /// Settings for the plan call
    pub planner_config: GenerateConfig,

    /// Settings for the whole-file rewrite call
    pub rewrite_config: GenerateConfig,
}

impl PlanRequest {
    /// A request with the default model settings and system instructions
    pub fn new(
        include_files: Vec<String>,
        context_files: Vec<String>,
        change_request: impl Into<String>,
    ) -> Self {
        Self {
            include_files,
            context_files,
            change_request: change_request.into(),
            planner_config: GenerateConfig::planner(PLAN_SYSTEM.to_string()),
            rewrite_config: GenerateConfig::full_rewrite(REWRITE_SYSTEM.to_string()),
        }
    }
}

/// The state between "plan generated" and "files rewritten", so the caller
/// can show the plan and collect clarifications in between.
#[derive(Debug)]
pub struct PlanSession {
    base_prompt: String,
    plan_response: String,
    plan: String,
    include_files: Vec<String>,
    rewrite_config: GenerateConfig,
}

impl PlanSession {
    /// Generate the plan (first model call). A response without a `<plan>`
    /// block is an error; the plan is displayed to the user and embedded
    /// in the rewrite prompt, so there is nothing sensible to continue with.
    pub fn generate(
        generator: &dyn TextGenerator,
        request: &PlanRequest,
        on_fragment: &mut dyn FnMut(&str),
    ) -> Result<PlanSession> {
        let base_prompt = base_prompt(request)?;
        log::debug!("plan prompt:\n{base_prompt}");

        let stream = generator.generate(&base_prompt, &request.planner_config)?;
        let plan_response = collect_stream(stream, on_fragment)?;

        let plan = between_tags("plan", &plan_response)
            .ok_or(EngineError::MissingPlan)?
            .trim()
            .to_string();

        Ok(PlanSession {
            base_prompt,
            plan_response,
            plan,
            include_files: request.include_files.clone(),
            rewrite_config: request.rewrite_config.clone(),
        })
    }

    /// The extracted plan text
    pub fn plan(&self) -> &str {
        &self.plan
    }

    /// Rewrite the files (second model call) and write back every
    /// `<updated-file>` whose name was offered for modification. Files the
    /// model volunteered beyond the include list are skipped with a
    /// warning. Returns the written paths.
    pub fn apply(
        &self,
        generator: &dyn TextGenerator,
        clarifications: &str,
        on_fragment: &mut dyn FnMut(&str),
    ) -> Result<Vec<PathBuf>> {
        let plan_section = tagged("generated-plan", &[], &[self.plan_response.as_str()]);
        let clarification_section = tagged("clarifications", &[], &[clarifications]);
        let prompt = line_join([
            self.base_prompt.as_str(),
            plan_section.as_str(),
            clarification_section.as_str(),
        ]);
        log::debug!("rewrite prompt:\n{prompt}");

        let stream = generator.generate(&prompt, &self.rewrite_config)?;
        let response = collect_stream(stream, on_fragment)?;

        let mut written = Vec::new();
        for (name, content) in updated_files(&response) {
            if !self.include_files.iter().any(|included| *included == name) {
                log::warn!("model attempted to modify {name}, which was not offered for rewriting; skipping");
                continue;
            }

            std::fs::write(&name, content)?;
            log::info!("updated {name}");
            written.push(PathBuf::from(name));
        }

        Ok(written)
    }
}

fn base_prompt(request: &PlanRequest) -> Result<String> {
    let mut context_children =
        vec![tagged("note", &[], &["These files are included for context but do not need to be modified."])];
    for path in &request.context_files {
        let content = std::fs::read_to_string(path)?;
        context_children.push(tagged(
            "context-file",
            &[("name", path.as_str())],
            &[content.as_str()],
        ));
    }

    let mut modify_children = vec![tagged("note", &[], &["These files might need to be modified."])];
    for path in &request.include_files {
        let content = std::fs::read_to_string(path)?;
        modify_children.push(tagged(
            "current-file",
            &[("name", path.as_str())],
            &[content.as_str()],
        ));
    }

    let context_refs: Vec<&str> = context_children.iter().map(String::as_str).collect();
    let modify_refs: Vec<&str> = modify_children.iter().map(String::as_str).collect();

    let change = tagged("change-request", &[], &[request.change_request.as_str()]);
    let change_repeated = tagged(
        "change-request-repeated",
        &[],
        &[request.change_request.as_str()],
    );
    let context_section = tagged("context-files", &[], &context_refs);
    let modify_section = tagged("files-to-modify", &[], &modify_refs);

    Ok(line_join([
        change.as_str(),
        context_section.as_str(),
        modify_section.as_str(),
        change_repeated.as_str(),
    ]))
}
