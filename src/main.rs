use firkaiser::{FilterSpec, FirFilter, design_lowpass, magnitude_db};

fn main() {
    run_radio_design();
    run_audio_design();
}

/// Low-pass for a 2.4 MHz radio capture: keep everything below 100 kHz,
/// suppress the rest by 70 dB.
fn get_radio_spec() -> FilterSpec {
    FilterSpec {
        sample_rate: 2_400_000.0,
        cutoff: 100_000.0,
        transition_width: 30_000.0,
        stopband_ripple_db: 70.0,
    }
}

/// Anti-aliasing low-pass ahead of audio decimation: 480 kHz in, audible
/// band kept, 69 dB of suppression above 15 kHz.
fn get_audio_spec() -> FilterSpec {
    FilterSpec {
        sample_rate: 480_000.0,
        cutoff: 15_000.0,
        transition_width: 3_650.0,
        stopband_ripple_db: 69.0,
    }
}

fn run_radio_design() {
    match design_lowpass(&get_radio_spec()) {
        Ok(filter) => report("radio", &get_radio_spec(), &filter),
        Err(error) => {
            println!("Error: {error}");
            std::process::exit(1);
        }
    }
}

fn run_audio_design() {
    match design_lowpass(&get_audio_spec()) {
        Ok(filter) => report("audio", &get_audio_spec(), &filter),
        Err(error) => {
            println!("Error: {error}");
            std::process::exit(1);
        }
    }
}

fn report(name: &str, spec: &FilterSpec, filter: &FirFilter) {
    let passband_edge = spec.cutoff - spec.transition_width / 2.0;
    let stopband_edge = spec.cutoff + spec.transition_width / 2.0;
    println!(
        "{name}: {} taps, beta {:.4}",
        filter.params.num_taps, filter.params.beta
    );
    println!(
        "  gain at {passband_edge} Hz: {:.4} dB",
        magnitude_db(&filter.taps, passband_edge, spec.sample_rate)
    );
    println!(
        "  gain at {stopband_edge} Hz: {:.1} dB",
        magnitude_db(&filter.taps, stopband_edge, spec.sample_rate)
    );
    println!("  first taps: {:#?}", &filter.taps[0..8]);
}
