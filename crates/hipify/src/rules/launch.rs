//! Kernel launch rewrite.
//!
//! `k<<<grid, block>>>(a, b)` becomes
//! `hipLaunchKernel(HIP_KERNEL_NAME(k), dim3(grid), dim3(block), 0, 0, a, b)`
//! and every declaration of the kernel gains a leading `hipLaunchParm lp`.

use hipify_api::{Captured, ConfigArg, Edit, EditOrigin, LaunchSyntax, Span};
use log::{debug, trace};

/// Edits for one launch
///
/// `nested` holds the edits of matches found inside the launch arguments.
/// Those inside an argument are folded into the rendered call; any other is
/// proposed on its own.
pub(crate) fn rewrite_launch(
    syntax: &LaunchSyntax,
    callee_name: &str,
    param_lists: &[Captured],
    config_args: &[ConfigArg],
    launch_args: &[Captured],
    nested: Vec<Edit>,
    full_span: Span,
) -> Vec<Edit> {
    let mut edits = Vec::with_capacity(param_lists.len() + 1);

    if param_lists.is_empty() {
        debug!("Declaration of kernel {callee_name} not visible, parameters left as is");
    }
    for params in param_lists {
        trace!("Initial parameter list of {callee_name}: {}", params.text);
        let list = params.text.trim();
        let edit = if list.is_empty() || list == "void" {
            Edit::new(params.span, syntax.extra_parameter.as_str(), EditOrigin::KernelParameters)
        } else {
            // Insertion only: parameter types may carry their own edits
            Edit::new(
                Span::at(params.span.start, 0),
                format!("{}, ", syntax.extra_parameter),
                EditOrigin::KernelParameters,
            )
        };
        edits.push(edit);
    }

    let arg_spans: Vec<Span> = config_args
        .iter()
        .filter_map(|arg| match arg {
            ConfigArg::Written { arg, .. } => Some(arg.span),
            ConfigArg::Defaulted => None,
        })
        .chain(launch_args.iter().map(|arg| arg.span))
        .collect();
    let (inner, outer): (Vec<Edit>, Vec<Edit>) = nested
        .into_iter()
        .partition(|edit| arg_spans.iter().any(|span| span.contains(&edit.span)));

    let call = render_launch(syntax, callee_name, config_args, launch_args, &inner);
    edits.push(Edit::new(full_span, call, EditOrigin::KernelLaunch));
    edits.extend(outer);
    edits
}

/// Build the target launch call from the captured arguments
///
/// `edits` inside an argument are applied to its text first.
pub fn render_launch(
    syntax: &LaunchSyntax,
    callee_name: &str,
    config_args: &[ConfigArg],
    launch_args: &[Captured],
    edits: &[Edit],
) -> String {
    let mut args = Vec::with_capacity(1 + config_args.len() + launch_args.len());
    args.push(format!("{}({callee_name})", syntax.kernel_name_wrapper));

    for arg in config_args {
        let rendered = match arg {
            ConfigArg::Written { arg, declared_type } if *declared_type == syntax.extent_type => {
                format!("{}({})", syntax.extent_type, splice(arg, edits))
            }
            ConfigArg::Written { arg, .. } => splice(arg, edits),
            ConfigArg::Defaulted => "0".to_string(),
        };
        args.push(rendered);
    }
    args.extend(launch_args.iter().map(|arg| splice(arg, edits)));

    format!("{}({})", syntax.launch_function, args.join(", "))
}

/// Text of `arg` with the edits inside it applied, first one wins on overlap
fn splice(arg: &Captured, edits: &[Edit]) -> String {
    let mut inside: Vec<&Edit> = edits.iter().filter(|e| arg.span.contains(&e.span)).collect();
    if inside.is_empty() {
        return arg.text.clone();
    }
    inside.sort_by_key(|e| (e.span.start, e.span.end));

    let mut out = String::with_capacity(arg.text.len());
    let mut cursor = 0;
    for edit in inside {
        let start = edit.span.start - arg.span.start;
        let end = edit.span.end - arg.span.start;
        let (Some(kept), Some(_)) = (arg.text.get(cursor..start), arg.text.get(start..end)) else {
            debug!("Dropped {edit} overlapping an earlier edit in `{}`", arg.text);
            continue;
        };
        out.push_str(kept);
        out.push_str(&edit.new_text);
        cursor = end;
    }
    out.push_str(arg.text.get(cursor..).unwrap_or(""));
    out
}
