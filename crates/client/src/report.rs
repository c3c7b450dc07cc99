//! Human-readable rendering of a version reply
//!
//! The layout is fixed: a rule, the eight mandatory fields in a set order,
//! then (verbose only) the bundled tool versions and any extra build info,
//! and a closing rule. Keeping this a pure function lets the field rules be
//! tested without a server.

use opsprobe_proto::version::VersionMessage;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const LABEL_WIDTH: usize = 18;

/// Render the report for stdout.
///
/// Verbose adds the tool-version fields; `extra_build_info` is shown only
/// when the server actually sent one.
pub fn render(reply: &VersionMessage, verbose: bool) -> String {
    let mut out = String::new();

    out.push_str(RULE);
    out.push('\n');

    field(&mut out, "Version:", &reply.version);
    field(&mut out, "Build Date:", &reply.build_date);
    field(&mut out, "Git Commit:", &reply.git_commit);
    field(&mut out, "Git Tag:", &reply.git_tag);
    field(&mut out, "Git Tree State:", &reply.git_tree_state);
    field(&mut out, "Toolchain:", &reply.toolchain_version);
    field(&mut out, "Compiler:", &reply.compiler);
    field(&mut out, "Platform:", &reply.platform);

    if verbose {
        field(&mut out, "Kustomize:", &reply.kustomize_version);
        field(&mut out, "Helm:", &reply.helm_version);
        field(&mut out, "Kubectl:", &reply.kubectl_version);
        field(&mut out, "Jsonnet:", &reply.jsonnet_version);
        if !reply.extra_build_info.is_empty() {
            field(&mut out, "Extra Build Info:", &reply.extra_build_info);
        }
    }

    out.push_str(RULE);
    out.push('\n');
    out
}

fn field(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("{:<width$}{}\n", label, value, width = LABEL_WIDTH));
}
