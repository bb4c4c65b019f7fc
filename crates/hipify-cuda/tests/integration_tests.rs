//! End-to-end translation through the CUDA front end

use hipify::{apply_plan, export_json, stage, SymbolTable, Translator};
use hipify_api::{SourceFile, TranslatorConfig};
use hipify_cuda::CudaFrontend;
use std::fs;
use tempfile::TempDir;

const VEC_ADD: &str = r#"#include <cuda_runtime.h>
#include <stdio.h>

#define CHECK(call) if ((call) != cudaSuccess) cudaDeviceReset()

__global__ void vecAdd(const float *a, const float *b, float *c, int n) {
    int i = blockIdx.x * blockDim.x + threadIdx.x;
    if (i < n) c[i] = a[i] + b[i];
}

int main() {
    int n = 1024;
    size_t bytes = n * sizeof(float);
    float *d_a, *d_b, *d_c;
    cudaMalloc(&d_a, bytes);
    cudaMalloc(&d_b, bytes);
    cudaMalloc(&d_c, bytes);
    cudaMemcpy(d_a, h_a, bytes, cudaMemcpyHostToDevice);
    vecAdd<<<(n + 255) / 256, 256>>>(d_a, d_b, d_c, n);
    cudaError_t err = cudaGetLastError();
    if (err != cudaSuccess) printf("cuda error: %s\n", cudaGetErrorString(err));
    cudaDeviceSynchronize();
    cudaFree(d_a);
    return 0;
}
"#;

const TEMPLATE_LAUNCH: &str = r#"template <typename T>
__global__ void scale(T *d, T s) {
    d[threadIdx.x] *= s;
}

void run(float *d, dim3 grid, dim3 block, cudaStream_t stream) {
    scale<float><<<grid, block, 0, stream>>>(d, 2.0f);
}
"#;

fn translate_text(text: &str) -> (String, usize) {
    let config = TranslatorConfig::default();
    let frontend = CudaFrontend::with_config(config.clone());
    let symbols = SymbolTable::cuda_to_hip().with_overrides(&config.extra_symbols);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kernel.cu");
    fs::write(&path, text).unwrap();

    let staged = stage(&path, &config).unwrap().unwrap();
    let files = vec![staged.load().unwrap()];
    let mut plan = Translator::new(&frontend, &symbols, &config).translate(&files);
    let edits = plan.edit_count();
    let outcomes = apply_plan(&mut plan, &files);
    assert!(outcomes.iter().all(|o| o.skipped.is_empty()), "{outcomes:?}");

    let restored = staged.restore().unwrap();
    assert_eq!(restored, path);
    (fs::read_to_string(&path).unwrap(), edits)
}

#[test]
fn test_vec_add_translation() {
    let (out, _) = translate_text(VEC_ADD);

    for expected in [
        "#include <hip_runtime.h>",
        "#include <stdio.h>",
        "if ((call) != hipSuccess) hipDeviceReset()",
        "__global__ void vecAdd(hipLaunchParm lp, const float *a, const float *b, float *c, int n) {",
        "int i = hipBlockIdx_x * hipBlockDim_x + hipThreadIdx_x;",
        "hipMalloc(&d_a, bytes);",
        "hipMemcpy(d_a, h_a, bytes, hipMemcpyHostToDevice);",
        "hipLaunchKernel(HIP_KERNEL_NAME(vecAdd), dim3((n + 255) / 256), dim3(256), 0, 0, d_a, d_b, d_c, n);",
        "hipError_t err = hipGetLastError();",
        r#"if (err != hipSuccess) printf("hip error: %s\n", hipGetErrorString(err));"#,
        "hipDeviceSynchronize();",
        "hipFree(d_a);",
    ] {
        assert!(out.contains(expected), "missing `{expected}` in:\n{out}");
    }
    assert!(!out.contains("<<<"));
    assert!(!out.contains("cuda"), "leftover CUDA names in:\n{out}");
}

#[test]
fn test_translation_is_idempotent() {
    let (once, first_edits) = translate_text(VEC_ADD);
    assert!(first_edits > 0);

    let (twice, second_edits) = translate_text(&once);
    assert_eq!(second_edits, 0);
    assert_eq!(once, twice);
}

#[test]
fn test_template_kernel_with_stream() {
    let (out, _) = translate_text(TEMPLATE_LAUNCH);

    assert!(out.contains("__global__ void scale(hipLaunchParm lp, T *d, T s) {"), "{out}");
    assert!(out.contains("d[hipThreadIdx_x] *= s;"), "{out}");
    assert!(out.contains("hipStream_t stream"), "{out}");
    assert!(
        out.contains("hipLaunchKernel(HIP_KERNEL_NAME(scale<float>), dim3(grid), dim3(block), 0, stream, d, 2.0f);"),
        "{out}"
    );
}

#[test]
fn test_launch_arguments_are_translated() {
    let source = "__global__ void k(int kind) {}\n\
                  void run(cudaStream_t s) {\n\
                  \x20   k<<<1, 1, 0, (cudaStream_t)0>>>(cudaMemcpyHostToDevice);\n\
                  \x20   k<<<1, 1>>>(\"cuda\");\n\
                  }\n";
    let (once, _) = translate_text(source);
    assert!(
        once.contains(
            "hipLaunchKernel(HIP_KERNEL_NAME(k), dim3(1), dim3(1), 0, (hipStream_t)0, hipMemcpyHostToDevice);"
        ),
        "{once}"
    );
    assert!(
        once.contains(r#"hipLaunchKernel(HIP_KERNEL_NAME(k), dim3(1), dim3(1), 0, 0, "hip");"#),
        "{once}"
    );

    let (twice, second_edits) = translate_text(&once);
    assert_eq!(second_edits, 0, "{twice}");
    assert_eq!(once, twice);
}

#[test]
fn test_kernel_prototype_gets_launch_parameter() {
    let source = "__global__ void k(int);\nvoid h() { k<<<1, 1>>>(3); }\n__global__ void k(int a) {}\n";
    let (out, _) = translate_text(source);
    assert_eq!(
        out,
        "__global__ void k(hipLaunchParm lp, int);\n\
         void h() { hipLaunchKernel(HIP_KERNEL_NAME(k), dim3(1), dim3(1), 0, 0, 3); }\n\
         __global__ void k(hipLaunchParm lp, int a) {}\n"
    );
}

#[test]
fn test_casts_to_source_types() {
    let (out, _) = translate_text("void f(int e) { cudaError_t r = (cudaError_t)e; }\n");
    assert_eq!(out, "void f(int e) { hipError_t r = (hipError_t)e; }\n");
}

#[test]
fn test_report_covers_both_passes() {
    let config = TranslatorConfig::default();
    let frontend = CudaFrontend::with_config(config.clone());
    let symbols = SymbolTable::cuda_to_hip();
    let files = vec![SourceFile::new("vec_add.hip.cu", VEC_ADD)];

    let plan = Translator::new(&frontend, &symbols, &config).translate(&files);
    assert_eq!(plan.passes().len(), 2);
    assert!(plan.passes().iter().all(|p| p.failed_files.is_empty()));
    assert!(plan.metrics().edits_rejected > 0, "includes are seen by both passes");

    let json: serde_json::Value = serde_json::from_str(&export_json(&plan).unwrap()).unwrap();
    assert_eq!(json["passes"].as_array().unwrap().len(), 2);
}
