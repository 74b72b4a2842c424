//! PIR interrupt registration.
//!
//! Installs the per-pin GPIO ISR service and hooks a rising-edge handler
//! on every PIR input.  The zone index travels as the handler argument so
//! a single handler serves all zones.  Called once from `main()` after the
//! input pins have been configured and before the loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::error::{Error, Result};
#[cfg(target_os = "espidf")]
use crate::pins;

/// Map an `esp_err_t` status (0 is `ESP_OK`) onto [`Error::Init`].
#[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
fn esp_check(ret: i32, what: &'static str) -> Result<()> {
    if ret == 0 { Ok(()) } else { Err(Error::Init(what)) }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn pir_gpio_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: esp_timer_get_time is a RTC counter read; safe in ISR context.
    let now_ms = (unsafe { esp_timer_get_time() } / 1_000) as u32;
    super::pir::pir_isr_handler(arg as usize, now_ms);
}

/// Register rising-edge interrupts on every PIR input.
#[cfg(target_os = "espidf")]
pub fn init_pir_interrupts() -> Result<()> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed.  The handler only posts to the
    // lock-free mailbox.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(Error::Init("GPIO ISR service install failed"));
        }

        for (zone, &pin) in pins::PIR_GPIOS.iter().enumerate() {
            esp_check(
                gpio_set_intr_type(pin, gpio_int_type_t_GPIO_INTR_POSEDGE),
                "PIR interrupt type config failed",
            )?;
            let arg = zone as *mut core::ffi::c_void;
            esp_check(
                gpio_isr_handler_add(pin, Some(pir_gpio_isr), arg),
                "PIR ISR handler add failed",
            )?;
            esp_check(gpio_intr_enable(pin), "PIR interrupt enable failed")?;
        }
    }
    info!("hw_init: PIR interrupts installed on {:?}", crate::pins::PIR_GPIOS);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_pir_interrupts() -> Result<()> {
    log::info!("hw_init(sim): PIR interrupts skipped");
    Ok(())
}
